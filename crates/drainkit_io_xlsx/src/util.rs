//! Stateless helper utilities used by the XLSX reader and writer.

use std::collections::BTreeSet;

use crate::conf::{
    N_HEIGHT_EXCEL_ROW_MAX, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_WIDTH_EXCEL_COL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{SpecMergeRange, SpecSheetLayout, XlsxIoError};

////////////////////////////////////////////////////////////////////////////////
// #region ColumnLetters

/// Convert an Excel column letter (`"A"`, `"V"`, `"AA"`) to a zero-based index.
pub fn derive_column_index(letters: &str) -> Option<usize> {
    let c_letters = letters.trim();
    if c_letters.is_empty() {
        return None;
    }

    let mut n_idx = 0usize;
    for chr in c_letters.chars() {
        if !chr.is_ascii_alphabetic() {
            return None;
        }
        let n_digit = (chr.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n_idx = n_idx.checked_mul(26)?.checked_add(n_digit)?;
    }

    let n_idx = n_idx - 1;
    if n_idx >= N_NCOLS_EXCEL_MAX {
        return None;
    }
    Some(n_idx)
}

/// Convert a zero-based column index to its Excel letter.
pub fn derive_column_letter(col_idx: usize) -> String {
    let mut l_chars = Vec::new();
    let mut n_rest = col_idx + 1;
    while n_rest > 0 {
        let n_digit = (n_rest - 1) % 26;
        l_chars.push((b'A' + n_digit as u8) as char);
        n_rest = (n_rest - 1) / 26;
    }
    l_chars.iter().rev().collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region MergeUtils

/// Cells covered by a merge, excluding each merge's anchor cell.
pub fn derive_merge_tracker(merges: &[SpecMergeRange]) -> BTreeSet<(usize, usize)> {
    let mut set_merged_cells = BTreeSet::new();

    for merge in merges {
        for row_idx in merge.row_start..=merge.row_end {
            for col_idx in merge.col_start..=merge.col_end {
                if (row_idx, col_idx) != (merge.row_start, merge.col_start) {
                    set_merged_cells.insert((row_idx, col_idx));
                }
            }
        }
    }

    set_merged_cells
}

/// Check a layout against Excel limits and merge rules before any write.
///
/// Merges must be ordered, span more than one cell, and not overlap.
pub fn validate_sheet_layout(layout: &SpecSheetLayout) -> Result<(), XlsxIoError> {
    for (row_idx, col_idx) in layout.cells.keys() {
        validate_cell_position(*row_idx, *col_idx)?;
    }

    for (n_idx, merge) in layout.merges.iter().enumerate() {
        if merge.row_end < merge.row_start || merge.col_end < merge.col_start {
            return Err(XlsxIoError::InvalidLayout(format!(
                "merge #{n_idx} has end before start: {merge:?}"
            )));
        }
        if merge.size() == 1 {
            return Err(XlsxIoError::InvalidLayout(format!(
                "merge #{n_idx} covers a single cell: {merge:?}"
            )));
        }
        validate_cell_position(merge.row_end, merge.col_end)?;

        for (n_idx_other, merge_other) in layout.merges.iter().enumerate().skip(n_idx + 1) {
            if merge.overlaps(merge_other) {
                return Err(XlsxIoError::InvalidLayout(format!(
                    "merge #{n_idx} overlaps merge #{n_idx_other}: {merge:?} / {merge_other:?}"
                )));
            }
        }
    }

    for (col_idx, width) in &layout.col_widths {
        validate_cell_position(0, *col_idx)?;
        if !(0.0..=N_WIDTH_EXCEL_COL_MAX).contains(width) {
            return Err(XlsxIoError::InvalidLayout(format!(
                "column {} width out of range: {width}",
                derive_column_letter(*col_idx)
            )));
        }
    }
    for (row_idx, height) in &layout.row_heights {
        validate_cell_position(*row_idx, 0)?;
        if !(0.0..=N_HEIGHT_EXCEL_ROW_MAX).contains(height) {
            return Err(XlsxIoError::InvalidLayout(format!(
                "row {} height out of range: {height}",
                row_idx + 1
            )));
        }
    }

    Ok(())
}

fn validate_cell_position(row_idx: usize, col_idx: usize) -> Result<(), XlsxIoError> {
    if row_idx >= N_NROWS_EXCEL_MAX {
        return Err(XlsxIoError::InvalidLayout(format!(
            "row index {row_idx} exceeds Excel limit."
        )));
    }
    if col_idx >= N_NCOLS_EXCEL_MAX {
        return Err(XlsxIoError::InvalidLayout(format!(
            "column index {col_idx} exceeds Excel limit."
        )));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(row_start: usize, col_start: usize, row_end: usize, col_end: usize) -> SpecMergeRange {
        SpecMergeRange {
            row_start,
            col_start,
            row_end,
            col_end,
        }
    }

    #[test]
    fn test_column_letter_round_trip_at_boundaries() {
        assert_eq!(derive_column_index("A"), Some(0));
        assert_eq!(derive_column_index("l"), Some(11));
        assert_eq!(derive_column_index("V"), Some(21));
        assert_eq!(derive_column_index("AA"), Some(26));
        assert_eq!(derive_column_index("A1"), None);
        assert_eq!(derive_column_index(""), None);

        assert_eq!(derive_column_letter(0), "A");
        assert_eq!(derive_column_letter(25), "Z");
        assert_eq!(derive_column_letter(26), "AA");
        assert_eq!(derive_column_letter(701), "ZZ");
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Inlets", "_"), "Inlets");
        assert_eq!(sanitize_sheet_name("a/b:c", "_"), "a_b_c");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn test_merge_tracker_excludes_anchor() {
        let set_merged = derive_merge_tracker(&[merge(1, 1, 3, 1), merge(0, 4, 0, 6)]);

        assert!(!set_merged.contains(&(1, 1)));
        assert!(set_merged.contains(&(2, 1)));
        assert!(set_merged.contains(&(3, 1)));
        assert!(!set_merged.contains(&(0, 4)));
        assert!(set_merged.contains(&(0, 6)));
        assert_eq!(set_merged.len(), 4);
    }

    #[test]
    fn test_validate_sheet_layout_rejects_bad_merges() {
        let mut layout = SpecSheetLayout::new("S");
        layout.merges.push(merge(0, 0, 0, 3));
        assert!(validate_sheet_layout(&layout).is_ok());

        layout.merges.push(merge(0, 2, 1, 2));
        assert!(matches!(
            validate_sheet_layout(&layout),
            Err(XlsxIoError::InvalidLayout(_))
        ));

        let mut layout_single = SpecSheetLayout::new("S");
        layout_single.merges.push(merge(4, 0, 4, 0));
        assert!(validate_sheet_layout(&layout_single).is_err());

        let mut layout_width = SpecSheetLayout::new("S");
        layout_width.col_widths.insert(0, 300.0);
        assert!(validate_sheet_layout(&layout_width).is_err());
    }
}
