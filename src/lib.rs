//! Graph-aggregation engine for hierarchical evaluation scores.
//!
//! `scoregraph_core` rolls numeric scores up a directed graph of entities
//! (a skill and its subskills, say) so that an ancestor's aggregate covers
//! its own direct scores plus every descendant's. The graph may be any shape:
//! cycles, fan-in and fan-out are all legal, and aggregation stays
//! deterministic for a fixed insertion order.
//!
//! ```
//! use scoregraph_core::{Direction, EdgeOptions, ScoreGraph};
//!
//! let mut graph = ScoreGraph::new();
//! graph.add_node("listening", vec![100.0]);
//! graph.add_node("note-taking", vec![50.0]);
//! graph
//!     .add_edge("listening", "note-taking", Direction::ToChild, EdgeOptions::default())
//!     .unwrap();
//!
//! let report = graph.calculate_node_scores();
//! assert_eq!(report["listening"].all_scores, vec![100.0, 50.0]);
//! assert_eq!(report["listening"].full_score, 75.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod graph;
pub mod store;

// Re-export key types for convenient access
pub use aggregate::{mean, NodeScores, ScoreCollector};
pub use error::GraphError;
pub use graph::ScoreGraph;
pub use store::{Direction, EdgeOptions, NodeId, Registry};
