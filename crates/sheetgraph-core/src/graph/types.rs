//! Types for the dependency graph.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeSet, HashMap};

/// A cell or range in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Fully qualified reference, e.g. `Sheet1!A1` or `Sheet1!A1:A3`.
    pub key: String,
    /// Sanitized name of the sheet the reference belongs to.
    pub sheet: String,
}

/// Directed dependency graph keyed by reference string.
///
/// Edges go from a formula cell to what it references, and from a range to
/// each cell it contains.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, ()>,
    node_indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or return the existing one with the same key.
    ///
    /// The sheet recorded by the first insertion is kept; later hints are
    /// ignored.
    pub fn add_node(&mut self, key: &str, sheet: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(key) {
            return idx;
        }
        let idx = self.graph.add_node(GraphNode {
            key: key.to_string(),
            sheet: sheet.to_string(),
        });
        self.node_indices.insert(key.to_string(), idx);
        idx
    }

    /// Add the edge `from -> to` unless it already exists.
    /// Returns true if a new edge was created.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) -> bool {
        if self.graph.contains_edge(from, to) {
            return false;
        }
        self.graph.add_edge(from, to, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.node_indices.contains_key(key)
    }

    pub fn node(&self, key: &str) -> Option<&GraphNode> {
        self.node_indices.get(key).map(|&idx| &self.graph[idx])
    }

    pub fn sheet_of(&self, key: &str) -> Option<&str> {
        self.node(key).map(|node| node.sheet.as_str())
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of incident edges, incoming plus outgoing. A self-reference
    /// counts twice.
    pub fn degree(&self, key: &str) -> Option<usize> {
        self.node_indices.get(key).map(|&idx| self.degree_at(idx))
    }

    fn degree_at(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
            + self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// Keys of the nodes with an edge into `key`.
    pub fn predecessors(&self, key: &str) -> Vec<&str> {
        self.neighbor_keys(key, Direction::Incoming)
    }

    /// Keys of the nodes `key` has an edge to.
    pub fn successors(&self, key: &str) -> Vec<&str> {
        self.neighbor_keys(key, Direction::Outgoing)
    }

    fn neighbor_keys(&self, key: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(key) else {
            return Vec::new();
        };
        let mut keys: Vec<&str> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].key.as_str())
            .collect();
        // petgraph yields the most recent edge first.
        keys.reverse();
        keys
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Edges as `(from, to)` keys, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.raw_edges().iter().map(move |edge| {
            (
                self.graph[edge.source()].key.as_str(),
                self.graph[edge.target()].key.as_str(),
            )
        })
    }

    /// Every node with its degree, in insertion order.
    pub fn degrees(&self) -> Vec<(&str, usize)> {
        self.graph
            .node_indices()
            .map(|idx| (self.graph[idx].key.as_str(), self.degree_at(idx)))
            .collect()
    }

    /// Distinct sheet names carried by nodes, sorted.
    pub fn sheets(&self) -> BTreeSet<&str> {
        self.nodes().map(|node| node.sheet.as_str()).collect()
    }

    /// Drop nodes with no edges. Returns how many were removed.
    pub fn remove_unconnected(&mut self) -> usize {
        let before = self.graph.node_count();
        let connected = self.graph.filter_map(
            |idx, node| (self.degree_at(idx) > 0).then(|| node.clone()),
            |_, edge| Some(*edge),
        );
        self.graph = connected;
        self.node_indices = self
            .graph
            .node_indices()
            .map(|idx| (self.graph[idx].key.clone(), idx))
            .collect();
        before - self.graph.node_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readding_node_and_edge_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        let b = graph.add_node("S!B1", "S");
        assert!(graph.add_edge(a, b));

        let a_again = graph.add_node("S!A1", "S");
        assert_eq!(a, a_again);
        assert!(!graph.add_edge(a_again, b));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_first_sheet_hint_wins() {
        let mut graph = DependencyGraph::new();
        graph.add_node("Data!A1", "Data");
        graph.add_node("Data!A1", "Main");
        assert_eq!(graph.sheet_of("Data!A1"), Some("Data"));
    }

    #[test]
    fn test_readding_node_keeps_edges() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        let b = graph.add_node("S!B1", "S");
        graph.add_edge(a, b);
        graph.add_node("S!B1", "Other");
        assert!(graph.contains_edge("S!A1", "S!B1"));
        assert_eq!(graph.predecessors("S!B1"), vec!["S!A1"]);
    }

    #[test]
    fn test_degree_counts_both_directions() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        let b = graph.add_node("S!B1", "S");
        let c = graph.add_node("S!C1", "S");
        graph.add_edge(a, b);
        graph.add_edge(c, b);
        graph.add_edge(b, a);
        assert_eq!(graph.degree("S!B1"), Some(3));
        assert_eq!(graph.degree("S!A1"), Some(2));
        assert_eq!(graph.degree("S!Z9"), None);
    }

    #[test]
    fn test_self_reference_counts_twice() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        graph.add_edge(a, a);
        assert_eq!(graph.degree("S!A1"), Some(2));
    }

    #[test]
    fn test_successors_in_insertion_order() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        for key in ["S!B1", "S!C1", "S!D1"] {
            let n = graph.add_node(key, "S");
            graph.add_edge(a, n);
        }
        assert_eq!(graph.successors("S!A1"), vec!["S!B1", "S!C1", "S!D1"]);
    }

    #[test]
    fn test_remove_unconnected_keeps_edges_and_lookup() {
        let mut graph = DependencyGraph::new();
        graph.add_node("S!Lonely1", "S");
        let a = graph.add_node("S!A1", "S");
        graph.add_node("T!Lonely2", "T");
        let b = graph.add_node("T!B1", "T");
        graph.add_edge(a, b);

        assert_eq!(graph.remove_unconnected(), 2);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_edge("S!A1", "T!B1"));
        assert!(!graph.contains_node("S!Lonely1"));
        assert_eq!(graph.sheet_of("T!B1"), Some("T"));

        // Indices were rebuilt, so idempotent insertion still works.
        graph.add_node("T!B1", "T");
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn test_sheets_are_distinct_and_sorted() {
        let mut graph = DependencyGraph::new();
        graph.add_node("b!A1", "b");
        graph.add_node("a!A1", "a");
        graph.add_node("b!A2", "b");
        assert_eq!(graph.sheets().into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
