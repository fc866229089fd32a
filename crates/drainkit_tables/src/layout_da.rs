//! Drainage Area Summary layout (columns A-L).
//!
//! Row 1 blank, row 2 title, rows 3-4 grouped headers, data from row 5.
//! Each export carries a single storm frequency, so intensity and flow go
//! to the 10-year columns (E, I); the 25/50/100-year columns stay blank.

use drainkit_io_xlsx::{EnumCellValue, SpecMergeRange, SpecSheetLayout};

use crate::conf::{
    C_DA_GROUP_FLOW, C_DA_GROUP_INTENSITY, C_FMT_DATA, C_FMT_HEADER, C_FMT_TITLE_RULED,
    C_SHEET_DA, C_TITLE_DA, N_DA_HEIGHT_HEADER, N_DA_HEIGHT_SUBHEADER, N_DA_HEIGHT_TITLE,
    N_DA_ROW_DATA_START, N_DA_ROW_HEADER, N_DA_ROW_SUBHEADER, N_DA_ROW_TITLE, N_HEIGHT_DATA_ROW,
    TUP_DA_COL_WIDTHS, TUP_DA_SINGLE_HEADERS, TUP_DA_STORM_YEARS,
};
use crate::spec::SpecDrainageAreaRecord;

const N_DA_NCOLS: usize = 12;
const N_COL_INTENSITY_START: usize = 4;
const N_COL_FLOW_START: usize = 8;

/// Build the Drainage Area Summary sheet, one data row per record in input order.
pub fn build_drainage_area_layout(records: &[SpecDrainageAreaRecord]) -> SpecSheetLayout {
    let mut layout = SpecSheetLayout::new(C_SHEET_DA);

    for (col_idx, width) in TUP_DA_COL_WIDTHS.iter().enumerate() {
        layout.col_widths.insert(col_idx, *width);
    }

    write_header(&mut layout);

    for (n_idx_record, record) in records.iter().enumerate() {
        let row_idx = N_DA_ROW_DATA_START + n_idx_record;
        layout.row_heights.insert(row_idx, N_HEIGHT_DATA_ROW);

        for (col_idx, value) in derive_da_row_values(record).into_iter().enumerate() {
            layout.set_cell(row_idx, col_idx, value, C_FMT_DATA);
        }
    }

    layout
}

/// Cell values of one data row, A through L.
pub fn derive_da_row_values(record: &SpecDrainageAreaRecord) -> [EnumCellValue; N_DA_NCOLS] {
    let mut l_values: [EnumCellValue; N_DA_NCOLS] = Default::default();
    l_values[0] = record.designation.clone().into();
    l_values[1] = record.area_acres.into();
    l_values[2] = record.tc_min.into();
    l_values[3] = record.runoff_coeff.into();
    l_values[N_COL_INTENSITY_START] = record.intensity.into();
    l_values[N_COL_FLOW_START] = record.flow_cfs.into();
    l_values
}

fn write_header(layout: &mut SpecSheetLayout) {
    layout.row_heights.insert(N_DA_ROW_TITLE, N_DA_HEIGHT_TITLE);
    layout.row_heights.insert(N_DA_ROW_HEADER, N_DA_HEIGHT_HEADER);
    layout.row_heights.insert(N_DA_ROW_SUBHEADER, N_DA_HEIGHT_SUBHEADER);

    layout.merge_cells(
        SpecMergeRange {
            row_start: N_DA_ROW_TITLE,
            col_start: 0,
            row_end: N_DA_ROW_TITLE,
            col_end: N_DA_NCOLS - 1,
        },
        C_TITLE_DA,
        C_FMT_TITLE_RULED,
    );

    for (col_idx, c_header) in TUP_DA_SINGLE_HEADERS.iter().enumerate() {
        layout.merge_cells(
            SpecMergeRange {
                row_start: N_DA_ROW_HEADER,
                col_start: col_idx,
                row_end: N_DA_ROW_SUBHEADER,
                col_end: col_idx,
            },
            *c_header,
            C_FMT_HEADER,
        );
    }

    for (col_start, c_group) in [
        (N_COL_INTENSITY_START, C_DA_GROUP_INTENSITY),
        (N_COL_FLOW_START, C_DA_GROUP_FLOW),
    ] {
        layout.merge_cells(
            SpecMergeRange {
                row_start: N_DA_ROW_HEADER,
                col_start,
                row_end: N_DA_ROW_HEADER,
                col_end: col_start + TUP_DA_STORM_YEARS.len() - 1,
            },
            c_group,
            C_FMT_HEADER,
        );
        for (n_offset, c_year) in TUP_DA_STORM_YEARS.iter().enumerate() {
            layout.set_cell(N_DA_ROW_SUBHEADER, col_start + n_offset, *c_year, C_FMT_HEADER);
        }
    }
}
