//! sheetgraph-core - Workbook loading, dependency graph construction, summary and export.

pub mod error;
pub mod graph;
pub mod render;
pub mod storage;
pub mod summary;
pub mod workbook;

pub use error::{Result, SheetGraphError};
pub use graph::{BuildOptions, DependencyGraph, FunctionStats, build_graph, build_graph_from_path};
pub use summary::Summary;
pub use workbook::{CellValue, Sheet, SheetCell, Workbook};

pub use sheetgraph_engine::engine::CellRef;
