//! registry.rs
//! Dense columnar node store with an id -> index lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::{ChildList, NodeId};

/// Arena-backed node/edge store.
///
/// Node records live in parallel vectors indexed by [`NodeId`]; arena order
/// is insertion order, which the aggregation output preserves. The string
/// id -> index lookup is the only hashed structure on the hot path, and it
/// is touched once per mutation call, never during traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    // Columnar Arrays
    pub ids: Vec<String>,
    pub scores: Vec<Vec<f64>>,

    // Topology: children per node, in edge-insertion order. Duplicate and
    // self edges are stored as-is; the aggregator decides what they mean.
    pub children: Vec<ChildList>,

    // Ephemeral lookup (Not serialized, rebuilt on load)
    #[serde(skip)]
    pub index: HashMap<String, NodeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn lookup(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Upsert. A fresh id allocates an arena slot; an existing id has its
    /// scores replaced while its adjacency (both directions) stays intact.
    pub fn upsert_node(&mut self, id: &str, scores: Vec<f64>) -> NodeId {
        if let Some(node) = self.lookup(id) {
            self.scores[node.index()] = scores;
            return node;
        }

        let node = NodeId(self.ids.len() as u32);
        self.ids.push(id.to_string());
        self.scores.push(scores);
        self.children.push(ChildList::new());
        self.index.insert(id.to_string(), node);
        node
    }

    /// Records the parent -> child relation. A repeated call appends another
    /// edge instance; no deduplication.
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        self.children[parent.index()].push(child);
    }

    #[inline(always)]
    pub fn get_children(&self, id: NodeId) -> &[NodeId] {
        &self.children[id.index()]
    }

    #[inline(always)]
    pub fn get_scores(&self, id: NodeId) -> &[f64] {
        &self.scores[id.index()]
    }

    pub fn get_id(&self, id: NodeId) -> &str {
        &self.ids[id.index()]
    }

    /// Rebuilds the id lookup after deserialization.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), NodeId::new(i)))
            .collect();
    }
}
