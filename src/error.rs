//! error.rs
//! Error types for graph mutation.

use thiserror::Error;

/// Errors raised synchronously by the edge-authoring calls.
///
/// Aggregation (`collect_all_scores` / `calculate_node_scores`) cannot fail
/// for a store built through the public API: every id an edge references
/// either existed or was auto-created when the edge was recorded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint names an id absent from the store while
    /// auto-creation was disabled for the call.
    #[error("Node '{0}' not found")]
    ReferenceNotFound(String),
}
