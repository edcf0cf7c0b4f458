//! graph.rs
//! `ScoreGraph`: the public surface over the dense registry.

use indexmap::IndexMap;
use tracing::debug;

use crate::aggregate::{NodeScores, ScoreCollector};
use crate::error::GraphError;
use crate::store::{Direction, EdgeOptions, NodeId, Registry};

/// A mutable graph of scored entities plus the two aggregation passes.
///
/// Purely synchronous and single-threaded; no internal locking. Callers that
/// share one instance across threads must serialize access themselves.
/// Aggregation recomputes from current store state on every call, so results
/// always reflect the latest mutations, including score overwrites.
#[derive(Debug, Clone, Default)]
pub struct ScoreGraph {
    store: Registry,
}

impl ScoreGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert. A fresh id creates a node with the given scores; an existing
    /// id has its scores replaced while its edges, in both directions, stay
    /// intact. Never fails.
    pub fn add_node(&mut self, id: &str, scores: Vec<f64>) -> NodeId {
        self.store.upsert_node(id, scores)
    }

    /// Records one directed edge.
    ///
    /// `from` is validated (or auto-created, per `options`) before `to` is
    /// ever looked at, so a not-found failure always names the first missing
    /// endpoint in call order. The authored `direction` only decides which
    /// endpoint becomes the parent of the underlying relation.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        direction: Direction,
        options: EdgeOptions,
    ) -> Result<(), GraphError> {
        let from_node = self.resolve_endpoint(from, options)?;
        let to_node = self.resolve_endpoint(to, options)?;

        let (parent, child) = match direction {
            Direction::ToChild => (from_node, to_node),
            Direction::ToParent => (to_node, from_node),
        };
        self.store.link(parent, child);
        Ok(())
    }

    /// Applies [`ScoreGraph::add_edge`] for each target in order, under the
    /// same validation and auto-creation semantics.
    pub fn add_edges(
        &mut self,
        from: &str,
        tos: &[&str],
        direction: Direction,
        options: EdgeOptions,
    ) -> Result<(), GraphError> {
        for to in tos {
            self.add_edge(from, to, direction, options)?;
        }
        Ok(())
    }

    fn resolve_endpoint(&mut self, id: &str, options: EdgeOptions) -> Result<NodeId, GraphError> {
        if let Some(node) = self.store.lookup(id) {
            return Ok(node);
        }
        if options.create_refs_if_not_existent {
            Ok(self.store.upsert_node(id, Vec::new()))
        } else {
            Err(GraphError::ReferenceNotFound(id.to_string()))
        }
    }

    /// The full reachable score set per node, keyed by id in node-insertion
    /// order.
    pub fn collect_all_scores(&self) -> IndexMap<String, Vec<f64>> {
        let collected = ScoreCollector::new(&self.store).collect();
        self.store.ids.iter().cloned().zip(collected).collect()
    }

    /// Per-node mean statistics over the direct and full reachable score
    /// sets, keyed by id in node-insertion order.
    pub fn calculate_node_scores(&self) -> IndexMap<String, NodeScores> {
        debug!(nodes = self.store.count(), "calculating node scores");
        let collected = ScoreCollector::new(&self.store).collect();
        self.store
            .ids
            .iter()
            .enumerate()
            .zip(collected)
            .map(|((idx, id), all_scores)| {
                let own = self.store.get_scores(NodeId::new(idx));
                (id.clone(), NodeScores::from_parts(own, all_scores))
            })
            .collect()
    }

    // --- Accessors ---

    pub fn node_count(&self) -> usize {
        self.store.count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.lookup(id).is_some()
    }

    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.store.lookup(id)
    }

    /// A node's own scores, in insertion order.
    pub fn scores_of(&self, id: &str) -> Option<&[f64]> {
        self.store.lookup(id).map(|node| self.store.get_scores(node))
    }

    /// A node's children ids, in edge-insertion order.
    pub fn children_of(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.store.lookup(id)?;
        Some(
            self.store
                .get_children(node)
                .iter()
                .map(|&child| self.store.get_id(child))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> EdgeOptions {
        EdgeOptions {
            create_refs_if_not_existent: false,
        }
    }

    #[test]
    fn test_add_edge_validates_from_before_to() {
        let mut graph = ScoreGraph::new();

        // Neither endpoint exists: the failure must name `from`.
        let err = graph
            .add_edge("A", "B", Direction::ToChild, strict())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('A') && msg.contains("not found"), "Msg: {}", msg);

        // With A present the same call must now name `to`.
        graph.add_node("A", vec![1.0]);
        let err = graph
            .add_edge("A", "B", Direction::ToChild, strict())
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains('B') && msg.contains("not found"), "Msg: {}", msg);

        // The failed calls must not have half-created anything.
        assert!(!graph.contains("B"));
    }

    #[test]
    fn test_add_edge_auto_creates_stubs_by_default() {
        let mut graph = ScoreGraph::new();
        graph
            .add_edge("A", "B", Direction::ToChild, EdgeOptions::default())
            .unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.scores_of("A"), Some(&[] as &[f64]));
        assert_eq!(graph.children_of("A"), Some(vec!["B"]));
    }

    #[test]
    fn test_to_parent_mirrors_the_relation() {
        let mut graph = ScoreGraph::new();
        graph.add_node("child", vec![5.0]);
        graph.add_node("parent", vec![1.0]);
        graph
            .add_edge("child", "parent", Direction::ToParent, EdgeOptions::default())
            .unwrap();

        // Underlying relation is parent -> child regardless of authoring
        // direction.
        assert_eq!(graph.children_of("parent"), Some(vec!["child"]));
        assert_eq!(graph.children_of("child"), Some(Vec::new()));

        let scores = graph.collect_all_scores();
        assert_eq!(scores["parent"], vec![1.0, 5.0]);
        assert_eq!(scores["child"], vec![5.0]);
    }

    #[test]
    fn test_add_edges_fans_out_in_order() {
        let mut graph = ScoreGraph::new();
        graph
            .add_edges("root", &["c", "a", "b"], Direction::ToChild, EdgeOptions::default())
            .unwrap();

        // `root` itself was auto-created, then targets in call order.
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.children_of("root"), Some(vec!["c", "a", "b"]));
    }

    #[test]
    fn test_overwriting_a_node_keeps_its_edges() {
        let mut graph = ScoreGraph::new();
        graph.add_node("A", vec![1.0]);
        graph.add_node("B", vec![50.0]);
        graph
            .add_edge("A", "B", Direction::ToChild, EdgeOptions::default())
            .unwrap();

        graph.add_node("A", vec![30.0]);

        let scores = graph.collect_all_scores();
        assert_eq!(scores["A"], vec![30.0, 50.0]);
    }

    #[test]
    fn test_output_maps_follow_node_insertion_order() {
        let mut graph = ScoreGraph::new();
        graph.add_node("zeta", vec![1.0]);
        graph.add_node("alpha", vec![2.0]);
        graph.add_node("mid", vec![3.0]);

        let scores = graph.collect_all_scores();
        let keys: Vec<&str> = scores.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let report = graph.calculate_node_scores();
        let keys: Vec<&str> = report.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_calculate_node_scores_means() {
        // Shape: A -> B -> C, plus a scoreless stub S above A.
        let mut graph = ScoreGraph::new();
        graph.add_node("A", vec![100.0]);
        graph.add_node("B", vec![50.0]);
        graph.add_node("C", vec![75.0]);
        graph
            .add_edge("A", "B", Direction::ToChild, EdgeOptions::default())
            .unwrap();
        graph
            .add_edge("B", "C", Direction::ToChild, EdgeOptions::default())
            .unwrap();
        graph
            .add_edge("S", "A", Direction::ToChild, EdgeOptions::default())
            .unwrap();

        let report = graph.calculate_node_scores();
        assert_eq!(report["A"].direct_score, 100.0);
        assert_eq!(report["A"].full_score, 75.0);
        assert_eq!(report["A"].all_scores, vec![100.0, 50.0, 75.0]);

        // Stub: no own scores so direct is 0, full is the mean of what it
        // reaches.
        assert_eq!(report["S"].direct_score, 0.0);
        assert_eq!(report["S"].all_scores, vec![100.0, 50.0, 75.0]);
        assert_eq!(report["S"].full_score, 75.0);
    }

    #[test]
    fn test_aggregation_reflects_mutations_between_calls() {
        let mut graph = ScoreGraph::new();
        graph.add_node("A", vec![10.0]);
        assert_eq!(graph.collect_all_scores()["A"], vec![10.0]);

        // No cache survives a mutation; the next pass sees the new state.
        graph
            .add_edge("A", "B", Direction::ToChild, EdgeOptions::default())
            .unwrap();
        graph.add_node("B", vec![20.0]);
        assert_eq!(graph.collect_all_scores()["A"], vec![10.0, 20.0]);
    }

    #[test]
    fn test_wide_root_aggregates_every_child() {
        let mut graph = ScoreGraph::new();
        graph.add_node("root", vec![0.0]);
        let ids: Vec<String> = (0..2_000).map(|i| format!("leaf{}", i)).collect();
        for id in &ids {
            graph.add_node(id, vec![1.0]);
        }
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        graph
            .add_edges("root", &refs, Direction::ToChild, EdgeOptions::default())
            .unwrap();

        let scores = graph.collect_all_scores();
        assert_eq!(scores["root"].len(), 2_001);
    }

    #[test]
    fn test_hundred_thousand_nodes_under_two_seconds() {
        // Binary-tree shape plus periodic forward cross-links for extra
        // convergence, one score per node.
        let n: usize = 100_000;
        let mut graph = ScoreGraph::new();
        for i in 0..n {
            graph.add_node(&format!("n{}", i), vec![(i % 100) as f64]);
        }
        for i in 1..n {
            let parent = format!("n{}", (i - 1) / 2);
            graph
                .add_edge(&parent, &format!("n{}", i), Direction::ToChild, EdgeOptions::default())
                .unwrap();
        }
        for i in (0..n - 101).step_by(97) {
            graph
                .add_edge(
                    &format!("n{}", i),
                    &format!("n{}", i + 101),
                    Direction::ToChild,
                    EdgeOptions::default(),
                )
                .unwrap();
        }

        let start = std::time::Instant::now();
        let report = graph.calculate_node_scores();
        let elapsed = start.elapsed();

        assert_eq!(report.len(), n);
        // Root reaches every node at least once through the tree edges.
        assert!(report["n0"].all_scores.len() >= n);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "aggregation took {:?}",
            elapsed
        );
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut graph = ScoreGraph::new();
        graph.add_node("A", vec![10.0, 20.0]);
        graph
            .add_edge("A", "B", Direction::ToChild, EdgeOptions::default())
            .unwrap();

        let report = graph.calculate_node_scores();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"direct_score\":15.0"));
        assert!(json.contains("\"all_scores\":[10.0,20.0]"));
    }
}
