//! Inlet Design Record layout (label column A, data columns B-V).

use drainkit_io_xlsx::{EnumCellValue, SpecMergeRange, SpecSheetLayout};

use crate::conf::{
    C_FMT_DATA, C_FMT_HEADER, C_FMT_HEADER_ROTATED, C_FMT_LABEL, C_FMT_TITLE, C_SHEET_INLET,
    C_TITLE_INLET, N_HEIGHT_DATA_ROW, N_INLET_ROW_DATA_START, N_INLET_ROW_HEADER_END,
    N_INLET_ROW_HEADER_START, N_INLET_ROW_TITLE, N_INLET_WIDTH_LABEL, TUP_INLET_COLUMNS,
    TUP_INLET_HEIGHTS_HEADER,
};
use crate::link::{SpecLinkIndex, lookup_drainage_area};
use crate::spec::{SpecDrainageAreaRecord, SpecInletRecord, SpecReportOptions};
use crate::util::{extract_inlet_type, format_station_offset, sum_flow_at_inlet};

const N_COL_LABEL: usize = 0;
const N_COL_DATA_START: usize = 1;
const N_INLET_NCOLS_DATA: usize = TUP_INLET_COLUMNS.len();

/// Build the Inlets sheet.
///
/// With `da_index`, each inlet pulls designation, area, C, Tc and intensity
/// from the drainage area whose outflow structure equals its structure number.
pub fn build_inlet_layout(
    records: &[SpecInletRecord],
    da_index: Option<&SpecLinkIndex<'_>>,
    options: &SpecReportOptions,
) -> SpecSheetLayout {
    let mut layout = SpecSheetLayout::new(C_SHEET_INLET);

    layout.col_widths.insert(N_COL_LABEL, N_INLET_WIDTH_LABEL);
    for (n_offset, column) in TUP_INLET_COLUMNS.iter().enumerate() {
        layout
            .col_widths
            .insert(N_COL_DATA_START + n_offset, column.width);
    }

    write_header(&mut layout);
    write_status_label(&mut layout, records.len(), &options.label_status);

    for (n_idx_record, record) in records.iter().enumerate() {
        let row_idx = N_INLET_ROW_DATA_START + n_idx_record;
        layout.row_heights.insert(row_idx, N_HEIGHT_DATA_ROW);

        let record_da = da_index.and_then(|index| {
            lookup_drainage_area(
                index,
                record.structure_no.as_deref(),
                options.if_trim_link_keys,
            )
        });
        for (n_offset, value) in derive_inlet_row_values(record, record_da)
            .into_iter()
            .enumerate()
        {
            layout.set_cell(row_idx, N_COL_DATA_START + n_offset, value, C_FMT_DATA);
        }
    }

    layout
}

/// Cell values of one data row, B through V.
///
/// Design year, grade, cross slope, depth and comments have no source field
/// and stay blank for manual completion.
pub fn derive_inlet_row_values(
    record: &SpecInletRecord,
    record_da: Option<&SpecDrainageAreaRecord>,
) -> [EnumCellValue; N_INLET_NCOLS_DATA] {
    let da_text = |f: fn(&SpecDrainageAreaRecord) -> Option<String>| {
        EnumCellValue::from(record_da.and_then(f))
    };
    let da_number = |f: fn(&SpecDrainageAreaRecord) -> Option<f64>| {
        EnumCellValue::from(record_da.and_then(f))
    };

    [
        // B
        record.structure_no.clone().into(),
        record.alignment.clone().into(),
        EnumCellValue::String(format_station_offset(
            record.station.as_deref(),
            record.offset,
        )),
        EnumCellValue::String(extract_inlet_type(record.description.as_deref())),
        record.structure_type.clone().into(),
        // G
        EnumCellValue::None,
        da_text(|da| da.designation.clone()),
        da_number(|da| da.area_acres),
        da_number(|da| da.runoff_coeff),
        da_number(|da| da.tc_min),
        da_number(|da| da.intensity),
        // M
        record.flow_captured.into(),
        EnumCellValue::None,
        EnumCellValue::None,
        record.flow_total_bypassed.into(),
        sum_flow_at_inlet(record.flow_captured, record.flow_total_bypassed).into(),
        // R
        EnumCellValue::None,
        record.max_spread.into(),
        record.flow_bypassed_rational.into(),
        record.bypass_target.clone().into(),
        EnumCellValue::None,
    ]
}

fn write_header(layout: &mut SpecSheetLayout) {
    for (row_idx, height) in TUP_INLET_HEIGHTS_HEADER.iter().enumerate() {
        layout.row_heights.insert(row_idx, *height);
    }

    layout.merge_cells(
        SpecMergeRange {
            row_start: N_INLET_ROW_TITLE,
            col_start: N_COL_DATA_START,
            row_end: N_INLET_ROW_TITLE,
            col_end: N_COL_DATA_START + N_INLET_NCOLS_DATA - 1,
        },
        C_TITLE_INLET,
        C_FMT_TITLE,
    );

    for (n_offset, column) in TUP_INLET_COLUMNS.iter().enumerate() {
        let col_idx = N_COL_DATA_START + n_offset;
        layout.merge_cells(
            SpecMergeRange {
                row_start: N_INLET_ROW_HEADER_START,
                col_start: col_idx,
                row_end: N_INLET_ROW_HEADER_END,
                col_end: col_idx,
            },
            column.header,
            if column.if_rotated {
                C_FMT_HEADER_ROTATED
            } else {
                C_FMT_HEADER
            },
        );
    }
}

/// One status label for all data rows; merged only when there are two or more.
fn write_status_label(layout: &mut SpecSheetLayout, n_records: usize, label_status: &str) {
    match n_records {
        0 => {}
        1 => layout.set_cell(N_INLET_ROW_DATA_START, N_COL_LABEL, label_status, C_FMT_LABEL),
        _ => layout.merge_cells(
            SpecMergeRange {
                row_start: N_INLET_ROW_DATA_START,
                col_start: N_COL_LABEL,
                row_end: N_INLET_ROW_DATA_START + n_records - 1,
                col_end: N_COL_LABEL,
            },
            label_status,
            C_FMT_LABEL,
        ),
    }
}

#[cfg(test)]
mod tests {
    use drainkit_io_xlsx::{derive_column_index, validate_sheet_layout};

    use super::*;
    use crate::link::build_link_index;

    fn col(letter: &str) -> usize {
        derive_column_index(letter).expect("column letter")
    }

    fn inlet(structure_no: &str) -> SpecInletRecord {
        SpecInletRecord {
            structure_no: Some(structure_no.to_string()),
            ..Default::default()
        }
    }

    fn value(layout: &SpecSheetLayout, row_idx: usize, letter: &str) -> EnumCellValue {
        layout
            .get_value(row_idx, col(letter))
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_header_block_geometry() {
        let layout = build_inlet_layout(&[], None, &SpecReportOptions::default());

        assert_eq!(
            value(&layout, 0, "B"),
            EnumCellValue::from("DRAINAGE STRUCTURE DESIGN RECORD - INLETS")
        );
        assert_eq!(value(&layout, 1, "B"), EnumCellValue::from("STRUCTURE NUMBER"));
        assert_eq!(value(&layout, 1, "Q"), EnumCellValue::from("SUM Q AT INLETS (CFS)"));
        assert_eq!(value(&layout, 1, "V"), EnumCellValue::from("COMMENTS"));
        assert!(layout.merges.contains(&SpecMergeRange {
            row_start: 0,
            col_start: col("B"),
            row_end: 0,
            col_end: col("V"),
        }));
        assert_eq!(layout.col_widths.len(), 22);
        assert_eq!(layout.col_widths.get(&col("A")), Some(&4.44));
        assert_eq!(layout.height(), 4);
        assert!(validate_sheet_layout(&layout).is_ok());
    }

    #[test]
    fn test_linked_drainage_area_fills_h_through_l() {
        let l_da = vec![SpecDrainageAreaRecord {
            designation: Some("DA-2".to_string()),
            outflow_structure: Some("CI-1".to_string()),
            area_acres: Some(0.019),
            tc_min: Some(10.0),
            runoff_coeff: Some(0.25),
            intensity: Some(9.058),
            flow_cfs: Some(0.05),
        }];
        let index = build_link_index(&l_da);
        let mut record = inlet("CI-1");
        record.flow_captured = Some(0.04);
        record.flow_total_bypassed = Some(0.01);

        let layout = build_inlet_layout(&[record], Some(&index), &SpecReportOptions::default());

        assert_eq!(value(&layout, 4, "H"), EnumCellValue::from("DA-2"));
        assert_eq!(value(&layout, 4, "I"), EnumCellValue::Number(0.019));
        assert_eq!(value(&layout, 4, "J"), EnumCellValue::Number(0.25));
        assert_eq!(value(&layout, 4, "K"), EnumCellValue::Number(10.0));
        assert_eq!(value(&layout, 4, "L"), EnumCellValue::Number(9.058));
        assert_eq!(value(&layout, 4, "M"), EnumCellValue::Number(0.04));
        assert_eq!(value(&layout, 4, "P"), EnumCellValue::Number(0.01));
        let EnumCellValue::Number(n_sum) = value(&layout, 4, "Q") else {
            panic!("sum Q must be numeric");
        };
        assert!((n_sum - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_unlinked_inlet_leaves_da_columns_blank() {
        let l_da = vec![SpecDrainageAreaRecord {
            designation: Some("DA-2".to_string()),
            outflow_structure: Some("CI-1".to_string()),
            ..Default::default()
        }];
        let index = build_link_index(&l_da);

        let layout = build_inlet_layout(
            &[inlet("CI-9"), inlet(" CI-1")],
            Some(&index),
            &SpecReportOptions::default(),
        );

        for row_idx in [4, 5] {
            for c_letter in ["H", "I", "J", "K", "L"] {
                assert_eq!(value(&layout, row_idx, c_letter), EnumCellValue::None);
            }
        }

        let options_trim = SpecReportOptions {
            if_trim_link_keys: true,
            ..Default::default()
        };
        let layout_trim = build_inlet_layout(&[inlet(" CI-1")], Some(&index), &options_trim);
        assert_eq!(value(&layout_trim, 4, "H"), EnumCellValue::from("DA-2"));
    }

    #[test]
    fn test_derived_columns() {
        let record = SpecInletRecord {
            structure_no: Some("CI-3".to_string()),
            station: Some("12+50.00".to_string()),
            offset: Some(0.0),
            description: Some("Node\\Inlets\\CI - Curb Inlets\\CI Des 2 STD".to_string()),
            structure_type: Some("Curb Inlet".to_string()),
            flow_captured: Some(3.0),
            ..Default::default()
        };

        let layout = build_inlet_layout(&[record], None, &SpecReportOptions::default());

        assert_eq!(value(&layout, 4, "D"), EnumCellValue::from("12+50.00"));
        assert_eq!(value(&layout, 4, "E"), EnumCellValue::from("CI Des 2 STD"));
        assert_eq!(value(&layout, 4, "F"), EnumCellValue::from("Curb Inlet"));
        assert_eq!(value(&layout, 4, "Q"), EnumCellValue::Number(3.0));
        for c_letter in ["G", "N", "O", "R", "V"] {
            assert_eq!(value(&layout, 4, c_letter), EnumCellValue::None);
        }
    }

    #[test]
    fn test_sum_q_blank_when_both_flows_unknown() {
        let layout = build_inlet_layout(&[inlet("CI-1")], None, &SpecReportOptions::default());
        assert_eq!(value(&layout, 4, "Q"), EnumCellValue::None);
    }

    #[test]
    fn test_missing_description_yields_empty_inlet_type() {
        let layout = build_inlet_layout(
            &[inlet("CI-1"), inlet("CI-2")],
            None,
            &SpecReportOptions::default(),
        );
        assert_eq!(value(&layout, 4, "E"), EnumCellValue::from(""));
        assert_eq!(value(&layout, 5, "E"), EnumCellValue::from(""));
    }

    #[test]
    fn test_status_label_spans_all_data_rows() {
        let l_records = vec![inlet("CI-1"), inlet("CI-2"), inlet("CI-3")];
        let layout = build_inlet_layout(&l_records, None, &SpecReportOptions::default());

        assert_eq!(value(&layout, 4, "A"), EnumCellValue::from("PROPOSED"));
        assert!(layout.merges.contains(&SpecMergeRange {
            row_start: 4,
            col_start: 0,
            row_end: 6,
            col_end: 0,
        }));
        assert!(validate_sheet_layout(&layout).is_ok());
    }

    #[test]
    fn test_single_row_label_is_not_merged() {
        let options = SpecReportOptions {
            label_status: "EXISTING".to_string(),
            ..Default::default()
        };
        let layout = build_inlet_layout(&[inlet("CI-1")], None, &options);

        assert_eq!(value(&layout, 4, "A"), EnumCellValue::from("EXISTING"));
        assert!(layout.merges.iter().all(|merge| merge.col_start != 0));
        assert!(validate_sheet_layout(&layout).is_ok());
    }
}
