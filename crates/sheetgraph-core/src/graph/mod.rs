//! Cell dependency graph.

mod builder;
mod stats;
mod types;

pub use builder::{BuildOptions, build_graph, build_graph_from_path};
pub use stats::FunctionStats;
pub use types::{DependencyGraph, GraphNode};
