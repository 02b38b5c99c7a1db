//! Sheet scoping for references.
//!
//! References written without a sheet prefix belong to the sheet holding the
//! formula. Graph keys are always fully qualified (`Sheet!A1`) so that cells on
//! different sheets never collide.

/// Remove the single quotes a reference uses around sheet names with spaces
/// or punctuation. They are reference syntax, not part of the sheet name.
pub fn sanitize_sheet_name(sheet: &str) -> String {
    sheet.replace('\'', "")
}

/// Split `Sheet!A1` into `(Some("Sheet"), "A1")`; `A1` gives `(None, "A1")`.
///
/// The split happens at the last `!` since cell and range parts never
/// contain one.
pub fn split_sheet(reference: &str) -> (Option<&str>, &str) {
    match reference.rsplit_once('!') {
        Some((sheet, local)) => (Some(sheet), local),
        None => (None, reference),
    }
}

/// Qualify a cell or range reference with `sheet` unless it already names one.
/// Quotes around an explicit sheet name are dropped.
pub fn qualify(reference: &str, sheet: &str) -> String {
    match split_sheet(reference) {
        (Some(own), local) => format!("{}!{}", sanitize_sheet_name(own), local),
        (None, local) => format!("{}!{}", sheet, local),
    }
}

/// The sheet a reference resolves to: its own prefix, or `default` if it has none.
pub fn resolving_sheet(reference: &str, default: &str) -> String {
    match split_sheet(reference) {
        (Some(own), _) => sanitize_sheet_name(own),
        (None, _) => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sheet() {
        assert_eq!(split_sheet("Sheet2!A1"), (Some("Sheet2"), "A1"));
        assert_eq!(split_sheet("'My Sheet'!A1:B2"), (Some("'My Sheet'"), "A1:B2"));
        assert_eq!(split_sheet("A1"), (None, "A1"));
    }

    #[test]
    fn test_qualify_defaults_to_current_sheet() {
        assert_eq!(qualify("A1", "Sheet1"), "Sheet1!A1");
        assert_eq!(qualify("A1:A3", "Sheet1"), "Sheet1!A1:A3");
    }

    #[test]
    fn test_qualify_keeps_explicit_sheet_without_quotes() {
        assert_eq!(qualify("Sheet2!B4", "Sheet1"), "Sheet2!B4");
        assert_eq!(qualify("'My Sheet'!B4", "Sheet1"), "My Sheet!B4");
    }

    #[test]
    fn test_resolving_sheet() {
        assert_eq!(resolving_sheet("'Q1 Data'!A1:A9", "Main"), "Q1 Data");
        assert_eq!(resolving_sheet("A1", "Main"), "Main");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("'Budget 2024'"), "Budget 2024");
        assert_eq!(sanitize_sheet_name("Plain"), "Plain");
    }
}
