//! CSV import as a single-sheet workbook

use crate::error::Result;
use crate::workbook::{CellValue, Sheet, SheetCell};
use sheetgraph_engine::engine::CellRef;
use std::path::Path;

/// Parse a CSV file into one sheet named `sheet_name`.
pub fn parse_csv(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_csv_content(&content, sheet_name))
}

pub fn parse_csv_content(content: &str, sheet_name: &str) -> Sheet {
    let mut cells = Vec::new();

    for (row_idx, line) in content.lines().enumerate() {
        for (col_idx, field) in parse_csv_line(line).into_iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            cells.push(SheetCell::new(
                CellRef::new(col_idx, row_idx),
                parse_csv_field(&field),
            ));
        }
    }

    Sheet::from_cells(sheet_name, cells)
}

/// Parse a single CSV line, handling quoted fields
pub(crate) fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    if field_was_quoted {
                        fields.push(std::mem::take(&mut current));
                    } else {
                        fields.push(current.trim().to_string());
                        current.clear();
                    }
                    field_was_quoted = false;
                }
                _ => current.push(c),
            }
        }
    }
    if field_was_quoted {
        fields.push(current);
    } else {
        fields.push(current.trim().to_string());
    }
    fields
}

/// Parse a CSV field into a cell value
/// - Text starting with `=` -> formula text, kept verbatim
/// - Valid number -> Number (unless it has leading zeros like "007")
/// - TRUE/FALSE -> Bool
/// - Otherwise -> Text
pub(crate) fn parse_csv_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }

    // Keep explicit surrounding whitespace (typically from quoted CSV fields).
    let trimmed = field.trim();
    if field != trimmed {
        return CellValue::Text(field.to_string());
    }

    if trimmed.starts_with('=') {
        return CellValue::Text(trimmed.to_string());
    }

    // Preserve strings that look like numbers but have leading zeros (e.g., "007", "00123")
    // unless they're just "0" or start with "0."
    if trimmed.starts_with('0')
        && trimmed.len() > 1
        && !trimmed.starts_with("0.")
        && trimmed.chars().nth(1).is_some_and(|c| c.is_ascii_digit())
    {
        return CellValue::Text(trimmed.to_string());
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        return CellValue::Number(n);
    }

    match trimmed {
        "TRUE" => CellValue::Bool(true),
        "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(trimmed.to_string()),
    }
}
