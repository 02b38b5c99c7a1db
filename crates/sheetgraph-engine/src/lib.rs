//! sheetgraph_engine - Formula reference scanning.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_every_range_member_belongs_to_an_extracted_range() {
        let refs = extract_references("=SUM(Data!B2:C3)*AVERAGE(D1:D2)+E5");
        for (cell, range) in &refs.range_members {
            assert!(refs.ranges.contains(range));
            assert!(expand_range(range).unwrap().contains(cell));
        }
        assert_eq!(refs.range_members.len(), 6);
        assert_eq!(refs.direct, vec!["E5"]);
    }

    #[test]
    fn test_qualified_members_match_qualified_range_sheet() {
        let refs = extract_references("=SUM('Q1 Data'!A1:A2)");
        for (cell, range) in &refs.range_members {
            let cell = qualify(cell, "Main");
            let range = qualify(range, "Main");
            assert_eq!(split_sheet(&cell).0, split_sheet(&range).0);
            assert_eq!(resolving_sheet(&cell, "Main"), "Q1 Data");
        }
    }

    #[test]
    fn test_function_calls_and_references_are_independent_scans() {
        let formula = "=ROUND(SUM(A1:A2),2)";
        assert_eq!(function_calls(formula), vec!["ROUND", "SUM"]);
        assert_eq!(extract_references(formula).ranges, vec!["A1:A2"]);
    }
}
