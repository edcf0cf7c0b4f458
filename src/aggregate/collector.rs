//! collector.rs
//! Cycle-safe, memoized depth-first score aggregation.

use tracing::{debug, trace};

use crate::store::{NodeId, Registry};

/// One frame of the explicit DFS stack.
struct Frame {
    node: NodeId,
    /// Cursor into the node's child list.
    next_child: usize,
    /// Scores accumulated so far: the node's own scores, then each finished
    /// child's aggregate in edge order.
    acc: Vec<f64>,
}

impl Frame {
    fn open(node: NodeId, store: &Registry) -> Self {
        Self {
            node,
            next_child: 0,
            acc: store.get_scores(node).to_vec(),
        }
    }
}

/// Computes, per node, the full list of scores reachable via child edges.
///
/// Two pieces of traversal state coexist and must not be conflated:
/// - a **memo** keyed by node, persisting for the whole pass, so a node
///   reachable from several roots (fan-in) is expanded exactly once;
/// - an **on-path** marker per node, scoped to the active DFS chain, used
///   solely to prune edges that re-enter an ancestor still mid-expansion
///   (true cycles).
///
/// A single "visited" flag would break one or the other.
pub struct ScoreCollector<'a> {
    store: &'a Registry,
}

impl<'a> ScoreCollector<'a> {
    pub fn new(store: &'a Registry) -> Self {
        Self { store }
    }

    /// Runs one full aggregation pass.
    ///
    /// Returns one aggregate per arena index: the node's own scores in
    /// insertion order, followed by each child's aggregate in edge-insertion
    /// order, with cycle edges pruned. Nodes are expanded lazily in store
    /// insertion order, so whichever chain first reaches a node inside a
    /// cycle owns that node's full expansion.
    pub fn collect(&self) -> Vec<Vec<f64>> {
        let count = self.store.count();
        debug!(nodes = count, "collecting reachable score sets");

        let mut memo: Vec<Option<Vec<f64>>> = vec![None; count];
        let mut on_path = vec![false; count];

        for idx in 0..count {
            if memo[idx].is_none() {
                self.expand(NodeId::new(idx), &mut memo, &mut on_path);
            }
        }

        memo.into_iter().map(|m| m.unwrap_or_default()).collect()
    }

    /// Iterative DFS from `root`.
    ///
    /// An explicit frame stack bounds memory by the longest acyclic path
    /// instead of the thread stack, so adversarial deep chains cannot
    /// overflow.
    fn expand(&self, root: NodeId, memo: &mut [Option<Vec<f64>>], on_path: &mut [bool]) {
        trace!(root = root.0, "expanding");
        on_path[root.index()] = true;
        let mut stack = vec![Frame::open(root, self.store)];

        while let Some(frame) = stack.last_mut() {
            let children = self.store.get_children(frame.node);
            if let Some(&child) = children.get(frame.next_child) {
                frame.next_child += 1;

                // The child is an ancestor still mid-expansion: a cycle
                // edge. Skip it entirely, appending nothing.
                if on_path[child.index()] {
                    continue;
                }
                // Already expanded from some earlier chain: splice in the
                // cached aggregate without walking the subtree again.
                if let Some(cached) = &memo[child.index()] {
                    frame.acc.extend_from_slice(cached);
                    continue;
                }
                on_path[child.index()] = true;
                stack.push(Frame::open(child, self.store));
            } else if let Some(done) = stack.pop() {
                on_path[done.node.index()] = false;
                if let Some(parent) = stack.last_mut() {
                    parent.acc.extend_from_slice(&done.acc);
                }
                memo[done.node.index()] = Some(done.acc);
            }
        }
    }
}
