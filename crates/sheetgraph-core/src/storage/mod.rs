//! Workbook loading for spreadsheet files, CSV and the .wbt text format

mod csv;
mod spreadsheet;
mod text;

pub use csv::{parse_csv, parse_csv_content};
pub use spreadsheet::load_spreadsheet;
pub use text::{parse_text_workbook, parse_text_workbook_content};

use crate::error::{Result, SheetGraphError};
use crate::workbook::Workbook;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// Load a workbook, choosing the reader from the file extension.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    if !path.is_file() {
        return Err(SheetGraphError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("Sheet1");
            let mut workbook = Workbook::new();
            workbook.push_sheet(parse_csv(path, name)?);
            Ok(workbook)
        }
        "wbt" => parse_text_workbook(path),
        ext if SPREADSHEET_EXTENSIONS.contains(&ext) => load_spreadsheet(path),
        _ => Err(SheetGraphError::UnsupportedFormat(path.to_path_buf())),
    }
}
