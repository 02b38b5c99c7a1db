//! Dependency graph construction from a workbook.
//!
//! Every formula cell becomes a node with an edge to each cell and range it
//! references. Ranges get an edge to each cell they contain, so a formula
//! over `A1:A3` reaches `A2` through the range node.

use std::path::Path;

use petgraph::graph::NodeIndex;
use sheetgraph_engine::engine::{
    ExtractedRefs, extract_references, function_calls, qualify, resolving_sheet,
    sanitize_sheet_name,
};
use tracing::{debug, info, warn};

use super::{DependencyGraph, FunctionStats};
use crate::error::Result;
use crate::storage::load_workbook;
use crate::workbook::{Sheet, SheetCell, Workbook};

/// Options for a workbook scan.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Drop nodes with no edges once the scan is done.
    pub remove_unconnected: bool,
    /// Emit a debug event for every formula, node and reference.
    pub trace_references: bool,
}

/// Load a workbook and build its graph. Load errors are returned as-is and no
/// partial graph is produced.
pub fn build_graph_from_path(
    path: &Path,
    options: &BuildOptions,
) -> Result<(DependencyGraph, FunctionStats)> {
    let workbook = load_workbook(path)?;
    Ok(build_graph(&workbook, options))
}

/// Scan every formula cell of `workbook`.
///
/// The scan always completes. A range that cannot be expanded is logged
/// with the cell it came from and left out of the graph.
pub fn build_graph(workbook: &Workbook, options: &BuildOptions) -> (DependencyGraph, FunctionStats) {
    let mut builder = GraphBuilder {
        graph: DependencyGraph::new(),
        stats: FunctionStats::new(),
        options,
    };

    for sheet in &workbook.sheets {
        builder.process_sheet(sheet);
    }

    let GraphBuilder {
        mut graph, stats, ..
    } = builder;

    if options.remove_unconnected {
        let removed = graph.remove_unconnected();
        info!(removed, "removed unconnected nodes");
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        functions = stats.len(),
        "dependency graph built"
    );
    (graph, stats)
}

struct GraphBuilder<'a> {
    graph: DependencyGraph,
    stats: FunctionStats,
    options: &'a BuildOptions,
}

impl GraphBuilder<'_> {
    fn process_sheet(&mut self, sheet: &Sheet) {
        info!(sheet = %sheet.name, "analyzing sheet");
        let sheet_name = sanitize_sheet_name(&sheet.name);

        for (cell, formula) in sheet.formula_cells() {
            self.process_formula_cell(cell, formula, &sheet_name);
        }
    }

    fn process_formula_cell(&mut self, cell: &SheetCell, formula: &str, sheet: &str) {
        let cell_key = format!("{}!{}", sheet, cell.coordinate());
        if self.options.trace_references {
            debug!(cell = %cell_key, formula, "formula");
        }

        for function in function_calls(formula) {
            self.stats.record(function);
        }

        self.add_node(&cell_key, sheet);

        let refs = extract_references(formula);
        for err in &refs.rejected {
            warn!(cell = %cell_key, "skipping range: {}", err);
        }

        self.add_references(&refs, &cell_key, sheet);
        self.add_ranges(&refs, &cell_key, sheet);
        self.add_range_members(&refs, sheet);
    }

    /// Formula cell -> each directly referenced cell.
    fn add_references(&mut self, refs: &ExtractedRefs, cell_key: &str, sheet: &str) {
        for reference in &refs.direct {
            let resolved = qualify(reference, sheet);
            if self.options.trace_references {
                debug!(from = %cell_key, cell = %resolved, "reference");
            }
            self.connect(cell_key, sheet, &resolved, &resolving_sheet(reference, sheet));
        }
    }

    /// Formula cell -> each referenced range.
    fn add_ranges(&mut self, refs: &ExtractedRefs, cell_key: &str, sheet: &str) {
        for range in &refs.ranges {
            let resolved = qualify(range, sheet);
            if self.options.trace_references {
                debug!(from = %cell_key, range = %resolved, "range");
            }
            self.connect(cell_key, sheet, &resolved, &resolving_sheet(range, sheet));
        }
    }

    /// Range -> each cell it contains.
    fn add_range_members(&mut self, refs: &ExtractedRefs, sheet: &str) {
        for (member, range) in &refs.range_members {
            let range_key = qualify(range, sheet);
            let member_key = qualify(member, sheet);
            self.connect(
                &range_key,
                &resolving_sheet(range, sheet),
                &member_key,
                &resolving_sheet(member, sheet),
            );
        }
    }

    fn connect(&mut self, from: &str, from_sheet: &str, to: &str, to_sheet: &str) {
        let from = self.add_node(from, from_sheet);
        let to = self.add_node(to, to_sheet);
        self.graph.add_edge(from, to);
    }

    fn add_node(&mut self, key: &str, sheet: &str) -> NodeIndex {
        if self.options.trace_references && !self.graph.contains_node(key) {
            debug!(node = %key, sheet, "adding node");
        }
        self.graph.add_node(key, sheet)
    }
}
