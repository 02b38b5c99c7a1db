//! Formula scanning API.
//!
//! This module provides the pattern-based formula analysis used to build the
//! dependency graph:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`extract_references`] - Find cell and range references in a formula
//! - [`expand_range`] - Enumerate the cells a range covers
//! - [`function_calls`] - Find function-call tokens for usage statistics
//! - [`qualify`], [`sanitize_sheet_name`] - Resolve references to their sheet

mod cell_ref;
mod functions;
mod range;
mod refs;
mod sheet;

pub use cell_ref::CellRef;
pub use functions::function_calls;
pub use range::{MAX_COLUMNS, MAX_ROWS, RangeBounds, RangeError, expand_range, parse_range};
pub use refs::{ExtractedRefs, extract_references};
pub use sheet::{qualify, resolving_sheet, sanitize_sheet_name, split_sheet};
