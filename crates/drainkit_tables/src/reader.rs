//! Table reader: input grid -> typed records.

use std::path::Path;

use drainkit_io_xlsx::{EnumCellValue, SpecCellGrid, read_sheet_grid};
use tracing::{info, warn};

use crate::resolve::resolve_columns;
use crate::spec::{
    EnumDaField, EnumInletField, ReportError, SemanticField, SpecDrainageAreaRecord,
    SpecFieldPhrases, SpecInletRecord, SpecSemanticRow, SpecTableRead,
};
use crate::util::{derive_number_value, derive_text_value};

////////////////////////////////////////////////////////////////////////////////
// #region SemanticRows

/// Header row as trimmed text; blank cells become empty strings.
pub fn derive_header_texts(row: &[EnumCellValue]) -> Vec<String> {
    row.iter()
        .map(|cell| cell.to_text().trim().to_string())
        .collect()
}

/// Project every data row of `grid` onto the fields resolved from its header.
///
/// Row 0 is the header. A data row whose column-A cell is blank is skipped,
/// whatever the rest of the row holds. Returns the rows and the fields that
/// no header matched.
pub fn derive_semantic_rows<F: SemanticField>(
    grid: &SpecCellGrid,
    phrases: &SpecFieldPhrases<F>,
) -> (Vec<SpecSemanticRow<F>>, Vec<F>) {
    let Some(row_header) = grid.first() else {
        return (vec![], phrases.entries().iter().map(|(f, _)| *f).collect());
    };

    let l_header = derive_header_texts(row_header);
    let dict_col_by_field = resolve_columns(&l_header, phrases);
    let l_fields_unresolved: Vec<F> = phrases
        .entries()
        .iter()
        .map(|(field, _)| *field)
        .filter(|field| !dict_col_by_field.contains_key(field))
        .collect();

    let mut l_rows = Vec::new();
    for row in &grid[1..] {
        if row.first().is_none_or(EnumCellValue::is_blank) {
            continue;
        }

        let dict_row: SpecSemanticRow<F> = dict_col_by_field
            .iter()
            .map(|(field, n_idx_col)| (*field, row.get(*n_idx_col).cloned().unwrap_or_default()))
            .collect();
        l_rows.push(dict_row);
    }

    (l_rows, l_fields_unresolved)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TypedRecords

struct RowCursor<'a, F> {
    row: &'a SpecSemanticRow<F>,
    n_idx_record: usize,
}

impl<F: SemanticField> RowCursor<'_, F> {
    fn text(&self, field: F) -> Option<String> {
        self.row.get(&field).and_then(derive_text_value)
    }

    fn number(&self, field: F) -> Option<f64> {
        let value = self.row.get(&field)?;
        match derive_number_value(value) {
            Ok(n) => n,
            Err(c_text) => {
                warn!(
                    field = field.name(),
                    record = self.n_idx_record,
                    text = %c_text,
                    "non-numeric value in numeric field treated as blank"
                );
                None
            }
        }
    }
}

/// Parse a drainage-area grid into typed records.
pub fn parse_drainage_area_grid(
    grid: &SpecCellGrid,
    phrases: &SpecFieldPhrases<EnumDaField>,
) -> SpecTableRead<SpecDrainageAreaRecord> {
    let (l_rows, l_fields_unresolved) = derive_semantic_rows(grid, phrases);

    let records = l_rows
        .iter()
        .enumerate()
        .map(|(n_idx_record, row)| {
            let cursor = RowCursor { row, n_idx_record };
            SpecDrainageAreaRecord {
                designation: cursor.text(EnumDaField::Designation),
                outflow_structure: cursor.text(EnumDaField::OutflowStructure),
                area_acres: cursor.number(EnumDaField::AreaAcres),
                tc_min: cursor.number(EnumDaField::TcMin),
                runoff_coeff: cursor.number(EnumDaField::RunoffCoeff),
                intensity: cursor.number(EnumDaField::Intensity),
                flow_cfs: cursor.number(EnumDaField::FlowCfs),
            }
        })
        .collect();

    SpecTableRead {
        records,
        fields_unresolved: l_fields_unresolved.iter().map(|f| f.name()).collect(),
    }
}

/// Parse an inlet grid into typed records.
pub fn parse_inlet_grid(
    grid: &SpecCellGrid,
    phrases: &SpecFieldPhrases<EnumInletField>,
) -> SpecTableRead<SpecInletRecord> {
    let (l_rows, l_fields_unresolved) = derive_semantic_rows(grid, phrases);

    let records = l_rows
        .iter()
        .enumerate()
        .map(|(n_idx_record, row)| {
            let cursor = RowCursor { row, n_idx_record };
            SpecInletRecord {
                structure_no: cursor.text(EnumInletField::StructureNo),
                alignment: cursor.text(EnumInletField::Alignment),
                station: cursor.text(EnumInletField::Station),
                offset: cursor.number(EnumInletField::Offset),
                structure_type: cursor.text(EnumInletField::StructureType),
                description: cursor.text(EnumInletField::Description),
                elevation_rim: cursor.number(EnumInletField::ElevationRim),
                flow_captured: cursor.number(EnumInletField::FlowCaptured),
                flow_bypassed_rational: cursor.number(EnumInletField::FlowBypassedRational),
                flow_total_bypassed: cursor.number(EnumInletField::FlowTotalBypassed),
                capture_efficiency: cursor.number(EnumInletField::CaptureEfficiency),
                max_spread: cursor.number(EnumInletField::MaxSpread),
                hgl_out: cursor.number(EnumInletField::HglOut),
                egl_out: cursor.number(EnumInletField::EglOut),
                bypass_target: cursor.text(EnumInletField::BypassTarget),
            }
        })
        .collect();

    SpecTableRead {
        records,
        fields_unresolved: l_fields_unresolved.iter().map(|f| f.name()).collect(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileReaders

fn read_input_grid(path: &Path) -> Result<SpecCellGrid, ReportError> {
    read_sheet_grid(path).map_err(|err| ReportError::UnreadableInput {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Read the drainage-area summary export at `path`.
pub fn read_drainage_areas(
    path: &Path,
    phrases: &SpecFieldPhrases<EnumDaField>,
) -> Result<SpecTableRead<SpecDrainageAreaRecord>, ReportError> {
    let l_grid = read_input_grid(path)?;
    let table = parse_drainage_area_grid(&l_grid, phrases);
    info!(
        path = %path.display(),
        n_records = table.records.len(),
        "drainage areas read"
    );
    Ok(table)
}

/// Read the inlet design record export at `path`.
pub fn read_inlets(
    path: &Path,
    phrases: &SpecFieldPhrases<EnumInletField>,
) -> Result<SpecTableRead<SpecInletRecord>, ReportError> {
    let l_grid = read_input_grid(path)?;
    let table = parse_inlet_grid(&l_grid, phrases);
    info!(
        path = %path.display(),
        n_records = table.records.len(),
        "inlets read"
    );
    Ok(table)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{TUP_DA_FIELD_PHRASES, TUP_INLET_FIELD_PHRASES};

    fn s(value: &str) -> EnumCellValue {
        EnumCellValue::from(value)
    }

    fn n(value: f64) -> EnumCellValue {
        EnumCellValue::Number(value)
    }

    fn da_phrases() -> SpecFieldPhrases<EnumDaField> {
        SpecFieldPhrases::from_static(&TUP_DA_FIELD_PHRASES)
    }

    fn inlet_phrases() -> SpecFieldPhrases<EnumInletField> {
        SpecFieldPhrases::from_static(&TUP_INLET_FIELD_PHRASES)
    }

    #[test]
    fn test_rows_with_blank_first_cell_are_skipped() {
        let l_grid = vec![
            vec![s("Label"), s("Drainage Area Designation"), s("Runoff Coefficient")],
            vec![s("1"), s("DA-1"), n(0.3)],
            vec![EnumCellValue::None, s("DA-ghost"), n(0.9)],
            vec![s("  "), s("DA-blank"), n(0.9)],
            vec![s("3"), s("DA-3"), n(0.5)],
        ];

        let table = parse_drainage_area_grid(&l_grid, &da_phrases());

        let l_designations: Vec<_> = table
            .records
            .iter()
            .map(|rec| rec.designation.as_deref())
            .collect();
        assert_eq!(l_designations, vec![Some("DA-1"), Some("DA-3")]);
    }

    #[test]
    fn test_sentinel_is_column_a_even_when_it_holds_no_field() {
        let l_grid = vec![
            vec![s("Drainage Area Designation"), s("Notes")],
            vec![EnumCellValue::None, s("x")],
            vec![s("DA-9"), s("y")],
        ];
        let table = parse_drainage_area_grid(&l_grid, &da_phrases());
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].designation.as_deref(), Some("DA-9"));
    }

    #[test]
    fn test_short_rows_yield_null_fields() {
        let l_grid = vec![
            vec![s("Label"), s("Structure No."), s("Spread (ft)")],
            vec![s("1"), s("CI-1")],
        ];

        let table = parse_inlet_grid(&l_grid, &inlet_phrases());

        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].structure_no.as_deref(), Some("CI-1"));
        assert_eq!(table.records[0].max_spread, None);
    }

    #[test]
    fn test_unresolved_fields_are_reported_not_fatal() {
        let l_grid = vec![
            vec![s("Label"), s("Structure No."), s("Flow (Captured) (cfs)")],
            vec![s("1"), s("CI-1"), n(0.04)],
        ];

        let table = parse_inlet_grid(&l_grid, &inlet_phrases());

        assert_eq!(table.records[0].flow_captured, Some(0.04));
        assert_eq!(table.records[0].description, None);
        assert!(table.fields_unresolved.contains(&"description"));
        assert!(!table.fields_unresolved.contains(&"structure_no"));
    }

    #[test]
    fn test_unused_inlet_fields_are_still_parsed() {
        let l_grid = vec![
            vec![
                s("Label"),
                s("Elevation (Rim) (ft)"),
                s("Capture Efficiency (%)"),
                s("Hydraulic Grade Line (Out) (ft)"),
                s("Energy Grade Line (Out) (ft)"),
            ],
            vec![s("1"), n(101.5), n(80.0), n(98.2), n(98.4)],
        ];

        let table = parse_inlet_grid(&l_grid, &inlet_phrases());
        let record = &table.records[0];

        assert_eq!(record.elevation_rim, Some(101.5));
        assert_eq!(record.capture_efficiency, Some(80.0));
        assert_eq!(record.hgl_out, Some(98.2));
        assert_eq!(record.egl_out, Some(98.4));
    }

    #[test]
    fn test_non_numeric_text_in_numeric_field_is_null() {
        let l_grid = vec![
            vec![s("Label"), s("Time of Concentration (min)")],
            vec![s("1"), s("n/a")],
            vec![s("2"), s("12")],
        ];

        let table = parse_drainage_area_grid(&l_grid, &da_phrases());

        assert_eq!(table.records[0].tc_min, None);
        assert_eq!(table.records[1].tc_min, Some(12.0));
    }

    #[test]
    fn test_empty_grid_yields_no_records() {
        let table = parse_inlet_grid(&vec![], &inlet_phrases());
        assert!(table.records.is_empty());
        assert_eq!(table.fields_unresolved.len(), EnumInletField::ALL.len());
    }

    #[test]
    fn test_unreadable_file_is_reported_with_path() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("corrupt.xlsx");
        std::fs::write(&path, b"not a zip archive").expect("write");

        let err = read_inlets(&path, &inlet_phrases()).expect_err("must fail");
        assert!(matches!(err, ReportError::UnreadableInput { .. }));
    }
}
