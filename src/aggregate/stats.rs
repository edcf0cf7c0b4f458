//! stats.rs
//! Per-node statistics derived from the collector output.

use serde::{Deserialize, Serialize};

/// Aggregated statistics for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeScores {
    /// Mean of the node's own scores; `0.0` when it has none.
    pub direct_score: f64,
    /// Mean over the full reachable score set (own plus descendants,
    /// cycle-pruned).
    pub full_score: f64,
    /// The full reachable set: own scores first, then each child subtree in
    /// edge order.
    pub all_scores: Vec<f64>,
}

impl NodeScores {
    /// Builds the report entry for one node from its own scores and its
    /// fully-expanded reachable set.
    pub fn from_parts(own: &[f64], all_scores: Vec<f64>) -> Self {
        Self {
            direct_score: mean(own),
            full_score: mean(&all_scores),
            all_scores,
        }
    }
}

/// Arithmetic mean, defined as `0.0` for an empty slice.
///
/// Plain f64 division, no rounding; callers round for display.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
