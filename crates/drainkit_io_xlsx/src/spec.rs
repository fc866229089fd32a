//! Shared XLSX specification models.

use std::collections::BTreeMap;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification, resolved into a `rust_xlsxwriter::Format` at write time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,
    /// Text rotation in degrees (`-90..=90`).
    pub rotation: Option<i16>,

    /// Top border override.
    pub top: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,
    /// Left border override.
    pub left: Option<i64>,
    /// Right border override.
    pub right: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            rotation: other.rotation.or(self.rotation),
            top: other.top.or(self.top),
            bottom: other.bottom.or(self.bottom),
            left: other.left.or(self.left),
            right: other.right.or(self.right),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValue

/// Normalized cell value on both the read and the write side.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// `true` for `None` and for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            EnumCellValue::None => true,
            EnumCellValue::String(s) => s.trim().is_empty(),
            EnumCellValue::Number(_) => false,
        }
    }

    /// Display text of the value; numbers use their shortest round-trip form.
    pub fn to_text(&self) -> String {
        match self {
            EnumCellValue::None => String::new(),
            EnumCellValue::String(s) => s.clone(),
            EnumCellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<Option<f64>> for EnumCellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(EnumCellValue::None, EnumCellValue::Number)
    }
}

impl From<Option<String>> for EnumCellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(EnumCellValue::None, EnumCellValue::String)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

/// Row-major grid read from one worksheet; row 0 is sheet row 1, column 0 is column A.
pub type SpecCellGrid = Vec<Vec<EnumCellValue>>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLayoutSpecification

/// Rectangular merge, all bounds zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecMergeRange {
    /// First row.
    pub row_start: usize,
    /// First column.
    pub col_start: usize,
    /// Last row.
    pub row_end: usize,
    /// Last column.
    pub col_end: usize,
}

impl SpecMergeRange {
    /// Whether `(row_idx, col_idx)` falls inside the range.
    pub fn contains(&self, row_idx: usize, col_idx: usize) -> bool {
        (self.row_start..=self.row_end).contains(&row_idx)
            && (self.col_start..=self.col_end).contains(&col_idx)
    }

    /// Whether two ranges share at least one cell.
    pub fn overlaps(&self, other: &SpecMergeRange) -> bool {
        self.row_start <= other.row_end
            && other.row_start <= self.row_end
            && self.col_start <= other.col_end
            && other.col_start <= self.col_end
    }

    /// Number of cells covered.
    pub fn size(&self) -> usize {
        (self.row_end + 1 - self.row_start) * (self.col_end + 1 - self.col_start)
    }
}

/// One styled cell of a sheet layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecLayoutCell {
    /// Cell value.
    pub value: EnumCellValue,
    /// Key into the writer's named format table.
    pub fmt_key: String,
}

/// Format-independent description of one output sheet.
///
/// Cells are keyed by zero-based `(row, col)`. Values written into a merge
/// are taken from its anchor (top-left) cell; other covered cells are skipped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecSheetLayout {
    /// Requested sheet name (sanitized by the writer).
    pub sheet_name: String,
    /// Styled cells by `(row, col)`.
    pub cells: BTreeMap<(usize, usize), SpecLayoutCell>,
    /// Merged ranges.
    pub merges: Vec<SpecMergeRange>,
    /// Column widths by column index.
    pub col_widths: BTreeMap<usize, f64>,
    /// Row heights by row index.
    pub row_heights: BTreeMap<usize, f64>,
}

impl SpecSheetLayout {
    /// Create an empty layout for `sheet_name`.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Default::default()
        }
    }

    /// Place a styled value at `(row_idx, col_idx)`, replacing any previous cell.
    pub fn set_cell(
        &mut self,
        row_idx: usize,
        col_idx: usize,
        value: impl Into<EnumCellValue>,
        fmt_key: &str,
    ) {
        self.cells.insert(
            (row_idx, col_idx),
            SpecLayoutCell {
                value: value.into(),
                fmt_key: fmt_key.to_string(),
            },
        );
    }

    /// Register a merge and place its anchor value.
    pub fn merge_cells(
        &mut self,
        merge: SpecMergeRange,
        value: impl Into<EnumCellValue>,
        fmt_key: &str,
    ) {
        self.set_cell(merge.row_start, merge.col_start, value, fmt_key);
        self.merges.push(merge);
    }

    /// Value at `(row_idx, col_idx)`, if a cell was placed there.
    pub fn get_value(&self, row_idx: usize, col_idx: usize) -> Option<&EnumCellValue> {
        self.cells.get(&(row_idx, col_idx)).map(|cell| &cell.value)
    }

    /// Number of rows spanned by placed cells and merges.
    pub fn height(&self) -> usize {
        let n_rows_cells = self.cells.keys().map(|(row, _)| row + 1).max().unwrap_or(0);
        let n_rows_merges = self.merges.iter().map(|m| m.row_end + 1).max().unwrap_or(0);
        usize::max(n_rows_cells, n_rows_merges)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Failures of the XLSX read/write capability.
#[derive(Debug, Error)]
pub enum XlsxIoError {
    /// Workbook could not be opened or parsed.
    #[error("Failed to open workbook {}: {message}", path.display())]
    Open {
        /// Workbook path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook has no worksheet.
    #[error("Workbook has no worksheet: {}", path.display())]
    NoSheet {
        /// Workbook path.
        path: PathBuf,
    },
    /// Named worksheet does not exist.
    #[error("Worksheet {sheet:?} not found in {}", path.display())]
    SheetNotFound {
        /// Workbook path.
        path: PathBuf,
        /// Requested sheet name.
        sheet: String,
    },
    /// Layout breaks an Excel or merge constraint.
    #[error("Invalid sheet layout: {0}")]
    InvalidLayout(String),
    /// `rust_xlsxwriter` rejected an operation.
    #[error("xlsx write error: {0}")]
    Write(String),
    /// Writer used after `close()`.
    #[error("Cannot write after close().")]
    Closed,
}

impl From<rust_xlsxwriter::XlsxError> for XlsxIoError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        XlsxIoError::Write(err.to_string())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
