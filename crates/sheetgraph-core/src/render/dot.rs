//! Graphviz DOT export.
//!
//! The output carries everything needed to draw the graph: sheet colors,
//! node and edge styling, an optional legend and the layout engine to use.

use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};

use tracing::warn;

use super::style::StyleConfig;
use crate::graph::DependencyGraph;

/// Node placement strategy, mapped to a Graphviz layout engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Layout {
    /// Force-directed (Fruchterman-Reingold).
    #[default]
    Spring,
    KamadaKawai,
    Circular,
}

impl Layout {
    pub fn engine(self) -> &'static str {
        match self {
            Layout::Spring => "fdp",
            Layout::KamadaKawai => "neato",
            Layout::Circular => "circo",
        }
    }
}

#[derive(Clone, Debug)]
pub struct DotOptions {
    /// Keep edge direction; otherwise each connected pair is drawn once.
    pub directed: bool,
    pub show_legend: bool,
    pub layout: Layout,
    pub title: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            directed: false,
            show_legend: true,
            layout: Layout::Spring,
            title: "Cell Dependency Graph".to_string(),
        }
    }
}

const TAB20B: &[&str] = &[
    "#393b79", "#5254a3", "#6b6ecf", "#9c9ede", "#637939", "#8ca252", "#b5cf6b", "#cedb9c",
    "#8c6d31", "#bd9e39", "#e7ba52", "#e7cb94", "#843c39", "#ad494a", "#d6616b", "#e7969c",
    "#7b4173", "#a55194", "#ce6dbd", "#de9ed6",
];

const TAB20: &[&str] = &[
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

const TAB10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

fn palette(name: &str) -> &'static [&'static str] {
    match name {
        "tab20b" => TAB20B,
        "tab20" => TAB20,
        "tab10" => TAB10,
        other => {
            warn!(cmap = other, "unknown color map, using tab20b");
            TAB20B
        }
    }
}

/// Color for each sheet, assigned in sheet-name order.
pub fn sheet_colors<'g>(graph: &'g DependencyGraph, cmap: &str) -> BTreeMap<&'g str, &'static str> {
    let colors = palette(cmap);
    graph
        .sheets()
        .into_iter()
        .enumerate()
        .map(|(i, sheet)| (sheet, colors[i % colors.len()]))
        .collect()
}

fn with_alpha(color: &str, alpha: f64) -> String {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("{}{:02x}", color, alpha)
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write `graph` as a DOT document.
pub fn write_dot<W: Write>(
    graph: &DependencyGraph,
    style: &StyleConfig,
    options: &DotOptions,
    out: &mut W,
) -> io::Result<()> {
    let (keyword, connector) = if options.directed {
        ("digraph", "->")
    } else {
        ("graph", "--")
    };
    let colors = sheet_colors(graph, &style.cmap);
    let [fig_w, fig_h] = style.figure_size(graph.node_count());
    // Node area is in square points; Graphviz wants a diameter in inches.
    let diameter = style.node_size.max(0.0).sqrt() / 72.0;

    writeln!(out, "{} dependencies {{", keyword)?;
    writeln!(out, "  layout=\"{}\";", options.layout.engine())?;
    writeln!(out, "  size=\"{:.2},{:.2}\";", fig_w, fig_h)?;
    writeln!(out, "  label=\"{}\";", escape(&options.title))?;
    writeln!(out, "  labelloc=\"t\";")?;
    writeln!(
        out,
        "  node [shape=circle, style=filled, fixedsize=true, width={:.4}, penwidth={}, fontsize={}];",
        diameter, style.linewidths, style.font_size
    )?;
    writeln!(
        out,
        "  edge [color=\"{}\", penwidth={}];",
        escape(&style.edge_color),
        style.width
    )?;

    for node in graph.nodes() {
        let color = colors.get(node.sheet.as_str()).copied().unwrap_or(TAB20B[0]);
        let fill = with_alpha(color, style.alpha);
        if style.with_labels {
            writeln!(
                out,
                "  \"{}\" [fillcolor=\"{}\", color=\"{}\", label=\"\", xlabel=\"{}\"];",
                escape(&node.key),
                fill,
                color,
                escape(&node.key)
            )?;
        } else {
            writeln!(
                out,
                "  \"{}\" [fillcolor=\"{}\", color=\"{}\", label=\"\"];",
                escape(&node.key),
                fill,
                color
            )?;
        }
    }

    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    for (from, to) in graph.edges() {
        if !options.directed {
            let pair = if from <= to { (from, to) } else { (to, from) };
            if !seen.insert(pair) {
                continue;
            }
        }
        writeln!(
            out,
            "  \"{}\" {} \"{}\";",
            escape(from),
            connector,
            escape(to)
        )?;
    }

    if options.show_legend && !colors.is_empty() {
        writeln!(out, "  subgraph cluster_legend {{")?;
        writeln!(out, "    label=\"Sheets\";")?;
        for (i, (sheet, color)) in colors.iter().enumerate() {
            writeln!(
                out,
                "    legend_{} [shape=box, fixedsize=false, label=\"{}\", fillcolor=\"{}\"];",
                i,
                escape(sheet),
                color
            )?;
        }
        writeln!(out, "  }}")?;
    }

    writeln!(out, "}}")
}
