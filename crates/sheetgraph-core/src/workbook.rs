//! In-memory workbook model.
//!
//! Loaders in [`crate::storage`] produce a [`Workbook`]; the graph builder only
//! ever reads one. Sheets keep their file order and cells are kept in
//! row-major order.

use sheetgraph_engine::engine::CellRef;

/// The stored value of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Formula text if this cell holds a formula (text starting with `=`).
    pub fn formula(&self) -> Option<&str> {
        match self {
            CellValue::Text(text) if text.starts_with('=') => Some(text),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SheetCell {
    pub cell: CellRef,
    pub value: CellValue,
}

impl SheetCell {
    pub fn new(cell: CellRef, value: CellValue) -> SheetCell {
        SheetCell { cell, value }
    }

    /// A1-style coordinate, e.g. `B3`.
    pub fn coordinate(&self) -> String {
        self.cell.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    pub name: String,
    cells: Vec<SheetCell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Sheet {
        Sheet {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Build a sheet from cells in any order. Later duplicates of a
    /// coordinate replace earlier ones.
    pub fn from_cells(name: impl Into<String>, cells: impl IntoIterator<Item = SheetCell>) -> Sheet {
        let mut sheet = Sheet::new(name);
        for cell in cells {
            sheet.set(cell.cell, cell.value);
        }
        sheet
    }

    /// Set a cell's value, keeping row-major order. Empty values remove the cell.
    pub fn set(&mut self, cell: CellRef, value: CellValue) {
        let key = (cell.row, cell.col);
        let pos = self.cells.binary_search_by_key(&key, |c| (c.cell.row, c.cell.col));
        match (pos, value) {
            (Ok(idx), CellValue::Empty) => {
                self.cells.remove(idx);
            }
            (Err(_), CellValue::Empty) => {}
            (Ok(idx), value) => self.cells[idx].value = value,
            (Err(idx), value) => self.cells.insert(idx, SheetCell::new(cell, value)),
        }
    }

    pub fn get(&self, cell: &CellRef) -> Option<&CellValue> {
        self.cells
            .binary_search_by_key(&(cell.row, cell.col), |c| (c.cell.row, c.cell.col))
            .ok()
            .map(|idx| &self.cells[idx].value)
    }

    /// Non-empty cells in row-major order.
    pub fn cells(&self) -> &[SheetCell] {
        &self.cells
    }

    /// Formula cells in row-major order.
    pub fn formula_cells(&self) -> impl Iterator<Item = (&SheetCell, &str)> {
        self.cells
            .iter()
            .filter_map(|cell| cell.value.formula().map(|formula| (cell, formula)))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Workbook {
        Workbook::default()
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|s| s.name.as_str())
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(name: &str) -> CellRef {
        CellRef::from_str(name).unwrap()
    }

    #[test]
    fn test_cells_stay_row_major() {
        let mut sheet = Sheet::new("S");
        sheet.set(cell("B2"), CellValue::Number(4.0));
        sheet.set(cell("A2"), CellValue::Number(3.0));
        sheet.set(cell("C1"), CellValue::Number(2.0));
        sheet.set(cell("A1"), CellValue::Number(1.0));

        let coords: Vec<String> = sheet.cells().iter().map(SheetCell::coordinate).collect();
        assert_eq!(coords, vec!["A1", "C1", "A2", "B2"]);
    }

    #[test]
    fn test_set_replaces_and_empty_removes() {
        let mut sheet = Sheet::new("S");
        sheet.set(cell("A1"), CellValue::Text("x".into()));
        sheet.set(cell("A1"), CellValue::Text("=B1".into()));
        assert_eq!(sheet.get(&cell("A1")), Some(&CellValue::Text("=B1".into())));

        sheet.set(cell("A1"), CellValue::Empty);
        assert!(sheet.cells().is_empty());
    }

    #[test]
    fn test_only_text_starting_with_equals_is_a_formula() {
        assert_eq!(CellValue::Text("=A1".into()).formula(), Some("=A1"));
        assert_eq!(CellValue::Text(" =A1".into()).formula(), None);
        assert_eq!(CellValue::Text("A1".into()).formula(), None);
        assert_eq!(CellValue::Number(1.0).formula(), None);
        assert_eq!(CellValue::Bool(true).formula(), None);
    }

    #[test]
    fn test_formula_cells_skips_literals() {
        let sheet = Sheet::from_cells(
            "S",
            [
                SheetCell::new(cell("A1"), CellValue::Number(1.0)),
                SheetCell::new(cell("A2"), CellValue::Text("=A1*2".into())),
                SheetCell::new(cell("A3"), CellValue::Text("label".into())),
            ],
        );
        let formulas: Vec<_> = sheet
            .formula_cells()
            .map(|(c, f)| (c.coordinate(), f.to_string()))
            .collect();
        assert_eq!(formulas, vec![("A2".to_string(), "=A1*2".to_string())]);
    }
}
