//! Dense node/edge storage: the foundation everything else reads.
pub mod registry;
pub mod types;

// Re-export key types for convenient access
pub use registry::Registry;
pub use types::{ChildList, Direction, EdgeOptions, NodeId};
