//! types.rs
//! Plain value types shared across the store and the aggregator.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A unique, stable index for a node within the registry arena.
///
/// Ids are dense: the n-th node ever inserted has index n, which is also the
/// store's insertion order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn new(idx: usize) -> Self {
        Self(idx as u32)
    }
}

/// Child adjacency list, in edge-insertion order.
///
/// Most nodes in an entity hierarchy have a handful of children, so small
/// lists stay inline without a heap allocation.
pub type ChildList = SmallVec<[NodeId; 4]>;

/// Which endpoint of an `add_edge` call becomes the child.
///
/// Both directions resolve to the same underlying parent→child relation;
/// they differ only in which endpoint is treated as the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The target becomes a child of the source: aggregation flows from the
    /// target into the source.
    ToChild,
    /// The target becomes a parent of the source: aggregation flows from the
    /// source into the target.
    ToParent,
}

/// Per-call options for `add_edge` / `add_edges`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeOptions {
    /// Auto-create a missing endpoint as an empty-score stub instead of
    /// failing with [`crate::GraphError::ReferenceNotFound`]. On by default.
    pub create_refs_if_not_existent: bool,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            create_refs_if_not_existent: true,
        }
    }
}
