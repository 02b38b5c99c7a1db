//! Parser for the .wbt text workbook format
//!
//! ```text
//! # comment
//! [Inputs]
//! A1: 100
//! A2: "Label"
//! [Totals]
//! B1: =SUM(Inputs!A1:A2)
//! ```
//!
//! Cells listed before the first `[Sheet]` header go to `Sheet1`.

use crate::error::{Result, SheetGraphError};
use crate::workbook::{CellValue, Sheet, Workbook};
use sheetgraph_engine::engine::CellRef;
use std::fs;
use std::path::Path;

const DEFAULT_SHEET: &str = "Sheet1";

/// Parse a .wbt file into a workbook
pub fn parse_text_workbook(path: &Path) -> Result<Workbook> {
    let content = fs::read_to_string(path)?;
    parse_text_workbook_content(&content)
}

/// Parse .wbt content from a string
pub fn parse_text_workbook_content(content: &str) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let mut current: Option<Sheet> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = header.trim();
            if name.is_empty() {
                return Err(SheetGraphError::Parse {
                    line: line_num + 1,
                    message: "Empty sheet name".to_string(),
                });
            }
            let duplicate = workbook.sheet(name).is_some()
                || current.as_ref().is_some_and(|s| s.name == name);
            if duplicate {
                return Err(SheetGraphError::Parse {
                    line: line_num + 1,
                    message: format!("Duplicate sheet: {}", name),
                });
            }
            if let Some(done) = current.replace(Sheet::new(name)) {
                workbook.push_sheet(done);
            }
            continue;
        }

        // Parse "CELLREF: VALUE" format
        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(SheetGraphError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| SheetGraphError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        let value = parse_cell_value(value_str, line_num + 1)?;
        current
            .get_or_insert_with(|| Sheet::new(DEFAULT_SHEET))
            .set(cell_ref, value);
    }

    if let Some(done) = current {
        workbook.push_sheet(done);
    }

    Ok(workbook)
}

/// Parse a cell value string
fn parse_cell_value(value: &str, line_num: usize) -> Result<CellValue> {
    let value = value.trim();

    if value.is_empty() {
        return Ok(CellValue::Empty);
    }

    // Formulas keep their leading '='
    if value.starts_with('=') {
        return Ok(CellValue::Text(value.to_string()));
    }

    // Quoted string: starts and ends with '"'
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        let text = &value[1..value.len() - 1];
        return Ok(CellValue::Text(unescape_text(text)));
    }

    match value {
        "TRUE" => return Ok(CellValue::Bool(true)),
        "FALSE" => return Ok(CellValue::Bool(false)),
        _ => {}
    }

    if let Ok(n) = value.parse::<f64>() {
        return Ok(CellValue::Number(n));
    }

    Err(SheetGraphError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

fn unescape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                match next {
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            } else {
                out.push('\\');
            }
        } else {
            out.push(ch);
        }
    }
    out
}
