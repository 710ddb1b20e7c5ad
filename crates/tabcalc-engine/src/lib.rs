//! tabcalc_engine - Cell classification and integer formula evaluation.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    fn sheet_from(rows: &[&[&str]]) -> Sheet {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut sheet = Sheet::new(rows.len(), cols);
        for (row, cells) in rows.iter().enumerate() {
            for (col, raw) in cells.iter().enumerate() {
                sheet.insert_raw(Address::new(col, row), *raw);
            }
        }
        sheet
    }

    fn display(sheet: &Sheet, name: &str) -> String {
        let addr = Address::from_str(name).unwrap();
        sheet.get_display(&addr).unwrap().into_owned()
    }

    #[test]
    fn test_from_str_single_letter_columns() {
        let a1 = Address::from_str("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = Address::from_str("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = Address::from_str("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(Address::from_str("AA1").unwrap().col, 26);
        assert_eq!(Address::from_str("AB1").unwrap().col, 27);
        assert_eq!(Address::from_str("AZ1").unwrap().col, 51);
        assert_eq!(Address::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_row_numbers() {
        assert_eq!(Address::from_str("A1").unwrap().row, 0);
        assert_eq!(Address::from_str("A10").unwrap().row, 9);
        assert_eq!(Address::from_str("A100").unwrap().row, 99);
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(Address::from_str("").is_none());
        assert!(Address::from_str("123").is_none());
        assert!(Address::from_str("ABC").is_none());
        assert!(Address::from_str("A0").is_none());
        assert!(Address::from_str("1A").is_none());
        assert!(Address::from_str("A 1").is_none());
        assert!(Address::from_str("a1").is_none());
    }

    #[test]
    fn test_end_to_end_small_grid() {
        let mut sheet = sheet_from(&[&["5", "=A1+3"], &["'hi", ""]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "5");
        assert_eq!(display(&sheet, "B1"), "8");
        assert_eq!(display(&sheet, "A2"), "hi");
        assert_eq!(display(&sheet, "B2"), "");
    }

    #[test]
    fn test_no_operator_precedence() {
        let mut sheet = sheet_from(&[&["=2+3*4"]]);
        sheet.resolve_all();
        assert_eq!(sheet.get(&Address::new(0, 0)), Some(&Cell::number(20)));
    }

    #[test]
    fn test_mutual_reference_is_recursive() {
        let mut sheet = sheet_from(&[&["=B1", "=A1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "#RECURSIVELINKS");
        assert_eq!(display(&sheet, "B1"), "#RECURSIVELINKS");
    }

    #[test]
    fn test_self_reference_is_recursive() {
        let mut sheet = sheet_from(&[&["=A1+1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "#RECURSIVELINKS");
    }

    #[test]
    fn test_dependent_of_cycle_inherits_code() {
        // C1 is outside the B1<->A1 loop but depends on it.
        let mut sheet = sheet_from(&[&["=B1", "=A1", "=A1+1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "C1"), "#RECURSIVELINKS");

        // Same grid, resolved starting from the dependent.
        let mut sheet = sheet_from(&[&["=A2+1", ""], &["=B2", "=A2"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "#RECURSIVELINKS");
        assert_eq!(display(&sheet, "A2"), "#RECURSIVELINKS");
        assert_eq!(display(&sheet, "B2"), "#RECURSIVELINKS");
    }

    /// A1 = A2+1, A2 = A3+1, ..., last = 1. Resolving from A1 has to walk
    /// the whole chain before anything can be folded.
    fn descending_chain(n: usize) -> Sheet {
        let mut sheet = Sheet::new(n, 1);
        for row in 0..n - 1 {
            sheet.insert_raw(Address::new(0, row), format!("=A{}+1", row + 2));
        }
        sheet.insert_raw(Address::new(0, n - 1), "1");
        sheet
    }

    #[test]
    fn test_deep_chain_resolves_on_default_stack() {
        let mut sheet = descending_chain(5000);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "5000");
        assert_eq!(display(&sheet, "A4999"), "2");
    }

    #[test]
    fn test_deep_chain_propagates_failure() {
        let mut sheet = descending_chain(2000);
        sheet.insert_raw(Address::new(0, 1999), "=1/0");
        sheet.resolve_all();
        assert!(
            sheet
                .iter()
                .all(|(_, cell)| *cell == Cell::Error(CellError::DivByZero))
        );
    }

    #[test]
    fn test_long_ring_terminates() {
        // A1 -> A2 -> ... -> A1000 -> A1
        let n = 1000;
        let mut sheet = Sheet::new(n, 1);
        for row in 0..n {
            let next = (row + 1) % n;
            sheet.insert_raw(Address::new(0, row), format!("=A{}", next + 1));
        }
        sheet.resolve_all();
        assert!(
            sheet
                .iter()
                .all(|(_, cell)| *cell == Cell::Error(CellError::RecursiveLinks))
        );
    }

    #[test]
    fn test_ascending_chain_resolves() {
        let n = 1000;
        let mut sheet = Sheet::new(n, 1);
        sheet.insert_raw(Address::new(0, 0), "1");
        for row in 1..n {
            sheet.insert_raw(Address::new(0, row), format!("=A{}+1", row));
        }
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1000"), "1000");
    }

    #[test]
    fn test_reference_errors() {
        let mut sheet = sheet_from(&[&["=Z99", "=1+foo", "=A1%2"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "#INVALIDREFERENCE");
        assert_eq!(display(&sheet, "B1"), "#INVALIDREFERENCE");
        assert_eq!(display(&sheet, "C1"), "#INVALIDOP");
    }

    #[test]
    fn test_type_errors() {
        let mut sheet = sheet_from(&[&["'text", "oops", "", "=A1", "=B1", "=C1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "D1"), "#INVALIDTYPE");
        assert_eq!(display(&sheet, "E1"), "#INVALIDTYPE");
        assert_eq!(display(&sheet, "F1"), "#INVALIDTYPE");
    }

    #[test]
    fn test_failed_formula_code_propagates() {
        let mut sheet = sheet_from(&[&["=1/0", "=A1+1", "=Q7", "=C1*2", "=B1+D1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "#DIVBYZERO");
        assert_eq!(display(&sheet, "B1"), "#DIVBYZERO");
        assert_eq!(display(&sheet, "C1"), "#INVALIDREFERENCE");
        assert_eq!(display(&sheet, "D1"), "#INVALIDREFERENCE");
        assert_eq!(display(&sheet, "E1"), "#DIVBYZERO");
    }

    #[test]
    fn test_resolution_order_does_not_matter() {
        // Forward and backward references give the same grid.
        let mut forward = sheet_from(&[&["=B1*2", "=C1+1", "10"]]);
        let mut backward = sheet_from(&[&["10", "=A1+1", "=B1*2"]]);
        forward.resolve_all();
        backward.resolve_all();
        assert_eq!(display(&forward, "A1"), "22");
        assert_eq!(display(&backward, "C1"), "22");
    }

    #[test]
    fn test_display_is_stable() {
        let mut sheet = sheet_from(&[&["=3*3", "'x"]]);
        sheet.resolve_all();
        let first = display(&sheet, "A1");
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), first);
        assert_eq!(display(&sheet, "A1"), "9");
    }

    #[test]
    fn test_formula_number_display_is_canonical() {
        let mut sheet = sheet_from(&[&["+007", "=A1"]]);
        sheet.resolve_all();
        assert_eq!(display(&sheet, "A1"), "+007");
        assert_eq!(display(&sheet, "B1"), "7");
    }
}
