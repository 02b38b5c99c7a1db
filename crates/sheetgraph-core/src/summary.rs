//! Human-readable and JSON summaries of a dependency graph.

use serde::Serialize;
use std::fmt;

use crate::graph::{DependencyGraph, FunctionStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDegree {
    pub node: String,
    pub sheet: String,
    pub degree: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionUsage {
    pub function: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub nodes: usize,
    pub edges: usize,
    pub sheets: Vec<String>,
    pub top_nodes: Vec<NodeDegree>,
    pub functions: Vec<FunctionUsage>,
}

impl Summary {
    /// Summarize `graph`, keeping the `top_n` nodes with the highest degree.
    /// Nodes with equal degree keep the order they were added in.
    pub fn from_graph(graph: &DependencyGraph, stats: &FunctionStats, top_n: usize) -> Summary {
        let mut degrees = graph.degrees();
        // Stable sort keeps insertion order among ties.
        degrees.sort_by(|a, b| b.1.cmp(&a.1));

        let top_nodes = degrees
            .into_iter()
            .take(top_n)
            .map(|(node, degree)| NodeDegree {
                node: node.to_string(),
                sheet: graph.sheet_of(node).unwrap_or_default().to_string(),
                degree,
            })
            .collect();

        let functions = stats
            .sorted()
            .into_iter()
            .map(|(function, count)| FunctionUsage {
                function: function.to_string(),
                count,
            })
            .collect();

        Summary {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            sheets: graph.sheets().into_iter().map(str::to_string).collect(),
            top_nodes,
            functions,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dependency Graph Summary ===")?;
        writeln!(f, "Number of nodes (cells): {}", self.nodes)?;
        writeln!(f, "Number of edges (dependencies): {}", self.edges)?;
        writeln!(f, "Sheets: {}", self.sheets.len())?;
        writeln!(f)?;

        writeln!(f, "Nodes with the highest degree:")?;
        if self.top_nodes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for entry in &self.top_nodes {
            writeln!(f, "  {}: {} dependencies", entry.node, entry.degree)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Most Used Functions ===")?;
        if self.functions.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for usage in &self.functions {
            writeln!(f, "  {}: {}", usage.function, usage.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DependencyGraph, FunctionStats) {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node("S!A1", "S");
        let b = graph.add_node("S!B1", "S");
        let c = graph.add_node("T!C1", "T");
        let d = graph.add_node("T!D1", "T");
        graph.add_edge(a, b);
        graph.add_edge(c, b);
        graph.add_edge(d, c);

        let mut stats = FunctionStats::new();
        stats.record("SUM");
        stats.record("IF");
        stats.record("SUM");
        (graph, stats)
    }

    #[test]
    fn test_top_nodes_by_degree_ties_in_insertion_order() {
        let (graph, stats) = sample();
        let summary = Summary::from_graph(&graph, &stats, 3);
        let top: Vec<(&str, usize)> = summary
            .top_nodes
            .iter()
            .map(|n| (n.node.as_str(), n.degree))
            .collect();
        assert_eq!(top, vec![("S!B1", 2), ("T!C1", 2), ("S!A1", 1)]);
        assert_eq!(summary.nodes, 4);
        assert_eq!(summary.edges, 3);
        assert_eq!(summary.sheets, vec!["S", "T"]);
    }

    #[test]
    fn test_text_output() {
        let (graph, stats) = sample();
        let text = Summary::from_graph(&graph, &stats, 1).to_string();
        assert!(text.contains("Number of nodes (cells): 4"));
        assert!(text.contains("Number of edges (dependencies): 3"));
        assert!(text.contains("  S!B1: 2 dependencies"));
        assert!(!text.contains("T!C1"));
        assert!(text.contains("  SUM: 2\n  IF: 1"));
    }

    #[test]
    fn test_empty_graph_summary() {
        let summary = Summary::from_graph(&DependencyGraph::new(), &FunctionStats::new(), 10);
        assert_eq!(summary.nodes, 0);
        assert!(summary.top_nodes.is_empty());
        assert!(summary.to_string().contains("(none)"));
    }

    #[test]
    fn test_json_output() {
        let (graph, stats) = sample();
        let json = Summary::from_graph(&graph, &stats, 2).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"], 4);
        assert_eq!(value["top_nodes"][0]["node"], "S!B1");
        assert_eq!(value["functions"][0]["function"], "SUM");
        assert_eq!(value["functions"][0]["count"], 2);
    }
}
