//! Sheetgraph - Cell dependency graphs for spreadsheet workbooks

mod style_paths;

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use sheetgraph_core::render::{DotOptions, Layout, StyleConfig, write_dot};
use sheetgraph_core::{BuildOptions, SheetGraphError, Summary, build_graph_from_path};
use tracing::info;

#[derive(Parser)]
#[command(name = "sheetgraph")]
#[command(about = "Build and summarize the cell dependency graph of a workbook")]
#[command(version)]
struct Cli {
    /// Workbook to scan (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv or .wbt)
    path: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Drop cells that have no dependencies either way
    #[arg(long)]
    remove_unconnected: bool,

    /// Number of highest-degree nodes to list
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Summary output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the summary only
    #[arg(long)]
    no_visualize: bool,

    /// Keep edge direction in the exported graph
    #[arg(long)]
    as_directed_graph: bool,

    /// Leave the sheet legend out of the exported graph
    #[arg(long)]
    hide_legends: bool,

    /// Node layout used when drawing
    #[arg(long, value_enum, default_value_t = LayoutArg::Spring)]
    layout: LayoutArg,

    /// Style override file (JSON, or TOML by extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the graph (default: <PATH>_dependency_graph.dot)
    #[arg(long)]
    output_path: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Spring,
    KamadaKawai,
    Circular,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Layout {
        match arg {
            LayoutArg::Spring => Layout::Spring,
            LayoutArg::KamadaKawai => Layout::KamadaKawai,
            LayoutArg::Circular => Layout::Circular,
        }
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    PathBuf::from(format!("{}_dependency_graph.dot", input.display()))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = BuildOptions {
        remove_unconnected: cli.remove_unconnected,
        trace_references: cli.verbose,
    };
    let (graph, stats) = build_graph_from_path(&cli.path, &options)
        .with_context(|| format!("Failed to load {}", cli.path.display()))?;

    let summary = Summary::from_graph(&graph, &stats, cli.top);
    match cli.format {
        OutputFormat::Text => print!("{}", summary),
        OutputFormat::Json => println!(
            "{}",
            summary.to_json().context("Failed to serialize summary")?
        ),
    }

    if cli.no_visualize {
        info!("skipping visualization");
        return Ok(());
    }

    let style_path = style_paths::style_override_path(cli.config.as_deref());
    let style = StyleConfig::resolve(graph.node_count(), style_path.as_deref());
    let dot_options = DotOptions {
        directed: cli.as_directed_graph,
        show_legend: !cli.hide_legends,
        layout: cli.layout.into(),
        ..DotOptions::default()
    };

    let output_path = cli
        .output_path
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.path));
    let file = File::create(&output_path)
        .with_context(|| format!("Failed to create {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    write_dot(&graph, &style, &dot_options, &mut writer)
        .and_then(|_| writer.flush())
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("Dependency graph saved to {}", output_path.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<SheetGraphError>() {
            Some(not_found @ SheetGraphError::FileNotFound(_)) => eprintln!("{}", not_found),
            _ => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_appends_suffix() {
        assert_eq!(
            default_output_path(Path::new("book.xlsx")),
            PathBuf::from("book.xlsx_dependency_graph.dot")
        );
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from([
            "sheetgraph",
            "book.xlsx",
            "--remove-unconnected",
            "--top",
            "3",
            "--layout",
            "kamada-kawai",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.remove_unconnected);
        assert_eq!(cli.top, 3);
        assert_eq!(Layout::from(cli.layout), Layout::KamadaKawai);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(!cli.no_visualize);
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["sheetgraph"]).is_err());
    }
}
