//! XLSX constants.

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Excel maximum column width in character units.
pub const N_WIDTH_EXCEL_COL_MAX: f64 = 255.0;
/// Excel maximum row height in points.
pub const N_HEIGHT_EXCEL_ROW_MAX: f64 = 409.0;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
