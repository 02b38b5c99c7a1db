//! Error types for Sheetgraph core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a workbook or building its graph
#[derive(Error, Debug)]
pub enum SheetGraphError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Unsupported workbook format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to read workbook {}: {source}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid style config {}: {message}", path.display())]
    StyleConfig { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, SheetGraphError>;
