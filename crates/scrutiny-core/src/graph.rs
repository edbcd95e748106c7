//! GraphModel: the deduplicated node/edge view of a discovered graph.
//!
//! [`GraphModel::build`] flattens the report's adjacency list into a list of
//! distinct state names plus one `(from, to)` pair per discovered successor.
//! Multi-edges are kept: two sources reaching the same successor, or one
//! source listing a successor twice, are distinct discoveries.
//!
//! The model also keeps a petgraph `StableGraph` over the same nodes to answer
//! multiplicity queries. It is built once and never mutated.

use indexmap::IndexSet;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use petgraph::Directed;

use crate::id::NodeId;
use crate::report::PageState;

/// Deduplicated nodes plus flattened edges of a discovered graph.
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// Distinct state names in first-seen order. Position is the [`NodeId`].
    nodes: IndexSet<String>,
    /// One entry per (state, successor) occurrence.
    edges: Vec<(String, String)>,
    /// Same nodes and edges, indexed for traversal.
    graph: StableGraph<String, (), Directed, u32>,
}

impl GraphModel {
    /// Builds the model from `Report::graph`.
    ///
    /// Source states claim their positions first, in entry order; successors
    /// that never appear as a source follow in edge order.
    pub fn build(entries: &[(PageState, Vec<PageState>)]) -> Self {
        let mut nodes = IndexSet::new();
        for (state, _) in entries {
            nodes.insert(state.name.clone());
        }

        let mut edges = Vec::new();
        for (state, successors) in entries {
            for successor in successors {
                nodes.insert(successor.name.clone());
                edges.push((state.name.clone(), successor.name.clone()));
            }
        }

        let mut graph = StableGraph::with_capacity(nodes.len(), edges.len());
        for name in &nodes {
            graph.add_node(name.clone());
        }
        for (from, to) in &edges {
            // Both names were inserted above.
            if let (Some(a), Some(b)) = (nodes.get_index_of(from), nodes.get_index_of(to)) {
                graph.add_edge(
                    NodeId(a as u32).into(),
                    NodeId(b as u32).into(),
                    (),
                );
            }
        }

        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            "built graph model"
        );

        GraphModel {
            nodes,
            edges,
            graph,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// Distinct node names, first-seen order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    /// Flattened edge pairs, duplicates preserved.
    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.nodes.get_index_of(name).map(|i| NodeId(i as u32))
    }

    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get_index(id.0 as usize).map(String::as_str)
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.edge_multiplicity(from, to) > 0
    }

    /// How many times `from -> to` was discovered.
    pub fn edge_multiplicity(&self, from: &str, to: &str) -> usize {
        match (self.node_id(from), self.node_id(to)) {
            (Some(a), Some(b)) => self
                .graph
                .edges_connecting(a.into(), b.into())
                .count(),
            _ => 0,
        }
    }

    /// Distinct `(from, to)` pairs in first-seen order with their multiplicity.
    pub fn distinct_edges(&self) -> Vec<(NodeId, NodeId, usize)> {
        let mut seen: indexmap::IndexMap<(NodeId, NodeId), usize> = indexmap::IndexMap::new();
        for edge in self.graph.edge_references() {
            let key = (NodeId::from(edge.source()), NodeId::from(edge.target()));
            *seen.entry(key).or_insert(0) += 1;
        }
        seen.into_iter().map(|((a, b), n)| (a, b, n)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(state: &str, successors: &[&str]) -> (PageState, Vec<PageState>) {
        (
            PageState::new(state),
            successors.iter().map(|s| PageState::new(*s)).collect(),
        )
    }

    #[test]
    fn nodes_are_distinct_in_first_seen_order() {
        let model = GraphModel::build(&[
            entry("A", &["B", "C"]),
            entry("B", &["C", "D"]),
            entry("C", &["A"]),
        ]);
        let nodes: Vec<&str> = model.nodes().collect();
        assert_eq!(nodes, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn successor_only_nodes_follow_sources() {
        let model = GraphModel::build(&[entry("A", &["Z"]), entry("B", &["A"])]);
        let nodes: Vec<&str> = model.nodes().collect();
        assert_eq!(nodes, vec!["A", "B", "Z"]);
    }

    #[test]
    fn edges_keep_duplicates() {
        let model = GraphModel::build(&[entry("A", &["B", "B"]), entry("C", &["B"])]);
        assert_eq!(model.edge_count(), 3);
        assert_eq!(model.edges()[0], ("A".to_string(), "B".to_string()));
        assert_eq!(model.edge_multiplicity("A", "B"), 2);
        assert_eq!(model.edge_multiplicity("C", "B"), 1);
        assert_eq!(model.edge_multiplicity("B", "A"), 0);

        let distinct = model.distinct_edges();
        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct[0], (NodeId(0), NodeId(2), 2));
    }

    #[test]
    fn lookups_by_name_and_id() {
        let model = GraphModel::build(&[entry("A", &["B"])]);
        assert_eq!(model.node_id("B"), Some(NodeId(1)));
        assert_eq!(model.node_name(NodeId(0)), Some("A"));
        assert!(model.contains_edge("A", "B"));
        assert!(!model.contains_node("Q"));
        assert_eq!(model.node_count(), 2);
    }

    #[test]
    fn empty_graph_builds_empty_model() {
        let model = GraphModel::build(&[]);
        assert_eq!(model.node_count(), 0);
        assert_eq!(model.edge_count(), 0);
    }
}
