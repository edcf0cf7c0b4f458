//! Score aggregation: cycle-safe traversal plus derived statistics.
pub mod collector;
pub mod stats;

// Re-export key types for convenient access
pub use collector::ScoreCollector;
pub use stats::{mean, NodeScores};
