//! `drainkit_io_xlsx` v1:
//! Spreadsheet read/write capability for the drainage table generator.
//!
//! - `conf`   : Excel limits
//! - `spec`   : cell values, formats, sheet layouts, errors
//! - `util`   : pure helper functions
//! - `reader` : calamine-backed grid reader
//! - `writer` : rust_xlsxwriter-backed layout writer
pub mod conf;
pub mod reader;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL};
pub use reader::{read_named_sheet_grid, read_sheet_grid};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecCellGrid, SpecLayoutCell, SpecMergeRange, SpecSheetLayout,
    XlsxIoError,
};
pub use util::{
    derive_column_index, derive_column_letter, derive_merge_tracker, sanitize_sheet_name,
    validate_sheet_layout,
};
pub use writer::XlsxWriter;
