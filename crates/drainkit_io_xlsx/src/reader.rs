//! Worksheet reader that turns a workbook sheet into a normalized cell grid.

use std::path::Path;

use calamine::{Data, DataType, Range, Reader, open_workbook_auto};
use tracing::debug;

use crate::spec::{EnumCellValue, SpecCellGrid, XlsxIoError};

/// Read the first worksheet of the workbook at `path`.
///
/// The grid is anchored at cell A1: leading blank rows/columns that fall
/// outside the sheet's used range are padded with [`EnumCellValue::None`].
/// An empty sheet yields an empty grid.
pub fn read_sheet_grid(path: &Path) -> Result<SpecCellGrid, XlsxIoError> {
    let mut workbook = open_workbook_auto(path).map_err(|err| XlsxIoError::Open {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| XlsxIoError::NoSheet {
            path: path.to_path_buf(),
        })?
        .map_err(|err| XlsxIoError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    Ok(derive_grid_from_range(&range))
}

/// Read the worksheet named `sheet_name` from the workbook at `path`.
pub fn read_named_sheet_grid(path: &Path, sheet_name: &str) -> Result<SpecCellGrid, XlsxIoError> {
    let mut workbook = open_workbook_auto(path).map_err(|err| XlsxIoError::Open {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(XlsxIoError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: sheet_name.to_string(),
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|err| XlsxIoError::Open {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    Ok(derive_grid_from_range(&range))
}

fn derive_grid_from_range(range: &Range<Data>) -> SpecCellGrid {
    let Some((n_row_start, n_col_start)) = range.start() else {
        return vec![];
    };
    let n_row_start = n_row_start as usize;
    let n_col_start = n_col_start as usize;

    let mut l_grid: SpecCellGrid = vec![vec![]; n_row_start];
    for row in range.rows() {
        let mut l_row = vec![EnumCellValue::None; n_col_start];
        l_row.extend(row.iter().map(derive_cell_value_from_data));
        l_grid.push(l_row);
    }

    debug!(
        n_rows = l_grid.len(),
        n_row_start, n_col_start, "worksheet grid loaded"
    );
    l_grid
}

fn derive_cell_value_from_data(cell: &Data) -> EnumCellValue {
    match cell {
        Data::Empty => EnumCellValue::None,
        Data::String(val) => EnumCellValue::String(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::String(if *val { "True" } else { "False" }.to_string()),
        Data::DateTime(_) => cell
            .as_f64()
            .map_or(EnumCellValue::None, EnumCellValue::Number),
        Data::DateTimeIso(val) | Data::DurationIso(val) => EnumCellValue::String(val.clone()),
        Data::Error(err) => EnumCellValue::String(format!("#{err:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_anchored_at_a1() {
        let mut range: Range<Data> = Range::new((1, 2), (2, 3));
        range.set_value((1, 2), Data::String("H".to_string()));
        range.set_value((2, 3), Data::Float(4.5));

        let l_grid = derive_grid_from_range(&range);

        assert_eq!(l_grid.len(), 3);
        assert!(l_grid[0].is_empty());
        assert_eq!(l_grid[1][0], EnumCellValue::None);
        assert_eq!(l_grid[1][2], EnumCellValue::String("H".to_string()));
        assert_eq!(l_grid[2][3], EnumCellValue::Number(4.5));
    }

    #[test]
    fn test_empty_range_yields_empty_grid() {
        let range: Range<Data> = Range::empty();
        assert!(derive_grid_from_range(&range).is_empty());
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = read_sheet_grid(Path::new("does/not/exist.xlsx")).expect_err("must fail");
        assert!(matches!(err, XlsxIoError::Open { .. }));
    }
}
