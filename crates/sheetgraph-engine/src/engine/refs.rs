//! Reference extraction from formula strings.
//!
//! Scans formula text for cell references (`A1`, `Sheet2!B4`) and range
//! references (`A1:B5`, `'My Sheet'!A1:A9`). This is pattern matching, not a
//! formula parser: anything shaped like a reference is taken as one, including
//! function names such as `LOG10` that happen to look like a cell.
//!
//! Handles:
//! - Absolute markers: `$A$1` is read as `A1`
//! - Bare and single-quoted sheet qualifiers
//! - Ranges, which are also expanded into their member cells

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::range::{RangeError, expand_range};

/// References found in one formula.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractedRefs {
    /// Single-cell references, in the order they appear.
    pub direct: Vec<String>,
    /// Range references, unexpanded, in the order they appear.
    pub ranges: Vec<String>,
    /// Each cell covered by a range, mapped to the range token it came from.
    /// A cell covered by two ranges maps to the later one.
    pub range_members: HashMap<String, String>,
    /// Range tokens that matched the pattern but could not be expanded, such
    /// as corners beyond `XFD1048576`. They appear nowhere else.
    pub rejected: Vec<RangeError>,
}

impl ExtractedRefs {
    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.ranges.is_empty()
    }
}

/// Extract all cell and range references from a formula.
///
/// The leading `=` is optional. A range whose corners fall outside the sheet
/// is left out and recorded in [`ExtractedRefs::rejected`].
pub fn extract_references(formula: &str) -> ExtractedRefs {
    let formula = formula.replace('$', "");
    let mut refs = ExtractedRefs::default();

    for m in reference_re().find_iter(&formula) {
        let token = m.as_str().trim();

        if token.contains(':') {
            match expand_range(token) {
                Ok(cells) => {
                    for cell in cells {
                        refs.range_members.insert(cell, token.to_string());
                    }
                    refs.ranges.push(token.to_string());
                }
                Err(err) => refs.rejected.push(err),
            }
        } else {
            refs.direct.push(token.to_string());
        }
    }

    refs
}

/// A sheet-qualified cell or range, or a bare one.
fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(concat!(
            r"('?[A-Za-z0-9_\-\[\] ]+'?![A-Z]{1,3}[1-9][0-9]*(:[A-Z]{1,3}[1-9][0-9]*)?)",
            r"|([A-Z]{1,3}[1-9][0-9]*(:[A-Z]{1,3}[1-9][0-9]*)?)",
        ))
        .expect("reference regex must compile")
    })
}
