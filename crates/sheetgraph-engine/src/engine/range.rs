//! Range expansion.
//!
//! Turns a rectangular range token such as `A1:B3` or `Sheet2!A1:B3` into the
//! list of cells it covers, row by row.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::cell_ref::CellRef;
use super::sheet::split_sheet;

/// Columns on a sheet (`A` to `XFD`).
pub const MAX_COLUMNS: usize = 16_384;
/// Rows on a sheet.
pub const MAX_ROWS: usize = 1_048_576;

/// A range token that cannot be expanded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("range '{0}' has no ':' separator")]
    MissingSeparator(String),

    #[error("invalid corner '{corner}' in range '{range}'")]
    InvalidCorner { range: String, corner: String },

    #[error("corner '{corner}' of range '{range}' is outside the sheet (max XFD1048576)")]
    OutOfBounds { range: String, corner: String },
}

/// Inclusive, normalized bounds of a range (0-indexed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeBounds {
    pub min_col: usize,
    pub min_row: usize,
    pub max_col: usize,
    pub max_row: usize,
}

impl RangeBounds {
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| CellRef::new(col, row)))
    }
}

/// Parse a bare range like "A1:B5" into normalized bounds.
///
/// The corners may be given in any order; the result always has
/// `min <= max` on both axes.
pub fn parse_range(range: &str) -> Result<RangeBounds, RangeError> {
    let Some((first, second)) = range.split_once(':') else {
        return Err(RangeError::MissingSeparator(range.to_string()));
    };
    let start = parse_corner(range, first)?;
    let end = parse_corner(range, second)?;

    Ok(RangeBounds {
        min_col: start.col.min(end.col),
        min_row: start.row.min(end.row),
        max_col: start.col.max(end.col),
        max_row: start.row.max(end.row),
    })
}

fn parse_corner(range: &str, corner: &str) -> Result<CellRef, RangeError> {
    let invalid = || RangeError::InvalidCorner {
        range: range.to_string(),
        corner: corner.to_string(),
    };
    if !corner_re().is_match(corner) {
        return Err(invalid());
    }
    let out_of_bounds = || RangeError::OutOfBounds {
        range: range.to_string(),
        corner: corner.to_string(),
    };
    // The pattern guarantees the shape, so a parse failure is an overflowing row.
    let cell = CellRef::from_str(corner).ok_or_else(out_of_bounds)?;
    if cell.col >= MAX_COLUMNS || cell.row >= MAX_ROWS {
        return Err(out_of_bounds());
    }
    Ok(cell)
}

fn corner_re() -> &'static Regex {
    static CORNER_RE: OnceLock<Regex> = OnceLock::new();
    CORNER_RE.get_or_init(|| {
        Regex::new(r"^[A-Z]{1,3}[1-9][0-9]*$").expect("range corner regex must compile")
    })
}

/// Expand a range token into every cell it covers.
///
/// The output is row-major (rows outer, columns inner, both ascending). When
/// the token carries a sheet prefix, every cell is re-prefixed with it.
pub fn expand_range(range_token: &str) -> Result<Vec<String>, RangeError> {
    let (sheet, range) = split_sheet(range_token);
    let bounds = parse_range(range)?;

    let cells = bounds
        .cells()
        .map(|cell| match sheet {
            Some(sheet) => format!("{}!{}", sheet, cell),
            None => cell.to_string(),
        })
        .collect();
    Ok(cells)
}
