//! Spreadsheet files (xlsx, xlsm, xlsb, xls, ods) read through calamine.

use crate::error::{Result, SheetGraphError};
use crate::workbook::{CellValue, Sheet, Workbook};
use calamine::{Data, Range, Reader, open_workbook_auto};
use sheetgraph_engine::engine::CellRef;
use std::path::Path;
use tracing::{debug, warn};

/// Load every sheet of a spreadsheet file. Formula cells become text values
/// with a leading `=`; other cells keep their literal value.
pub fn load_spreadsheet(path: &Path) -> Result<Workbook> {
    let workbook_error = |source| SheetGraphError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = open_workbook_auto(path).map_err(workbook_error)?;
    let mut workbook = Workbook::new();

    for name in reader.sheet_names() {
        let values = reader.worksheet_range(&name).map_err(workbook_error)?;
        let formulas = match reader.worksheet_formula(&name) {
            Ok(formulas) => Some(formulas),
            Err(err) => {
                warn!(sheet = %name, error = %err, "formulas unavailable, reading values only");
                None
            }
        };

        let sheet = sheet_from_ranges(&name, &values, formulas.as_ref());
        debug!(sheet = %name, cells = sheet.cells().len(), "loaded sheet");
        workbook.push_sheet(sheet);
    }

    Ok(workbook)
}

fn sheet_from_ranges(name: &str, values: &Range<Data>, formulas: Option<&Range<String>>) -> Sheet {
    let mut sheet = Sheet::new(name);

    // used_cells() positions are relative to the range start.
    let (start_row, start_col) = values.start().unwrap_or_default();
    for (row, col, data) in values.used_cells() {
        let cell = CellRef::new(col + start_col as usize, row + start_row as usize);
        sheet.set(cell, convert_value(data));
    }

    if let Some(formulas) = formulas {
        let (start_row, start_col) = formulas.start().unwrap_or_default();
        for (row, col, formula) in formulas.used_cells() {
            if formula.is_empty() {
                continue;
            }
            let cell = CellRef::new(col + start_col as usize, row + start_row as usize);
            let text = if formula.starts_with('=') {
                formula.clone()
            } else {
                format!("={}", formula)
            };
            sheet.set(cell, CellValue::Text(text));
        }
    }

    sheet
}

fn convert_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial number; dates never reference anything.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
    }
}
