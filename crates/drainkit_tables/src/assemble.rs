//! Report assembler: read inputs, link, lay out, persist.

use std::path::Path;

use drainkit_io_xlsx::{SpecSheetLayout, XlsxIoError, XlsxWriter};
use tracing::{info, warn};

use crate::conf::derive_report_formats;
use crate::layout_da::build_drainage_area_layout;
use crate::layout_inlet::build_inlet_layout;
use crate::link::{build_link_index, lookup_drainage_area};
use crate::reader::{read_drainage_areas, read_inlets};
use crate::report::{ReportAssemble, ReportAssembleBuilder};
use crate::spec::{ReportError, SpecReportOptions};

const C_TABLE_DA: &str = "drainage areas";
const C_TABLE_INLET: &str = "inlets";

/// Assembled sheets, in output order, plus the run report.
#[derive(Debug, Clone)]
pub struct SpecReportDocument {
    pub layouts: Vec<SpecSheetLayout>,
    pub report: ReportAssemble,
}

fn check_inputs(path_da: Option<&Path>, path_inlets: Option<&Path>) -> Result<(), ReportError> {
    if path_da.is_none() && path_inlets.is_none() {
        return Err(ReportError::NoInputSelected);
    }
    for path in [path_da, path_inlets].into_iter().flatten() {
        if !path.is_file() {
            return Err(ReportError::InputNotFound(path.to_path_buf()));
        }
    }
    Ok(())
}

fn record_unresolved(
    builder: &mut ReportAssembleBuilder,
    c_table: &str,
    fields_unresolved: &[&'static str],
) {
    for field in fields_unresolved {
        warn!(table = c_table, field = *field, "no header matched field; column left blank");
    }
    builder.add_unresolved_fields(c_table, fields_unresolved);
}

/// Build the output sheets from the supplied inputs without writing anything.
///
/// Every supplied path is checked before any of them is parsed. Drainage
/// areas, when supplied, always serve as link context for the inlet sheet.
pub fn assemble_report(
    path_da: Option<&Path>,
    path_inlets: Option<&Path>,
    options: &SpecReportOptions,
) -> Result<SpecReportDocument, ReportError> {
    check_inputs(path_da, path_inlets)?;

    let table_da = path_da
        .map(|path| read_drainage_areas(path, &options.phrases_da))
        .transpose()?;
    let table_inlet = path_inlets
        .map(|path| read_inlets(path, &options.phrases_inlet))
        .transpose()?;

    let mut builder = ReportAssembleBuilder::default();
    let mut l_layouts = Vec::with_capacity(2);

    if let Some(table) = &table_da {
        builder.add_da_records(table.records.len());
        record_unresolved(&mut builder, C_TABLE_DA, &table.fields_unresolved);
        l_layouts.push(build_drainage_area_layout(&table.records));
    }

    if let Some(table) = &table_inlet {
        builder.add_inlet_records(table.records.len());
        record_unresolved(&mut builder, C_TABLE_INLET, &table.fields_unresolved);

        let da_index = table_da.as_ref().map(|t| build_link_index(&t.records));
        if let Some(index) = &da_index {
            let n_linked = table
                .records
                .iter()
                .filter(|record| {
                    lookup_drainage_area(
                        index,
                        record.structure_no.as_deref(),
                        options.if_trim_link_keys,
                    )
                    .is_some()
                })
                .count();
            builder.add_inlets_linked(n_linked);
        }
        l_layouts.push(build_inlet_layout(&table.records, da_index.as_ref(), options));
    }

    for layout in &l_layouts {
        builder.add_sheet(layout.sheet_name.clone());
    }

    Ok(SpecReportDocument {
        layouts: l_layouts,
        report: builder.build(),
    })
}

/// Render every sheet, then save once; nothing is written if any sheet fails.
pub fn write_report(document: &SpecReportDocument, path_out: &Path) -> Result<(), ReportError> {
    let to_write_failed = |err: XlsxIoError| ReportError::WriteFailed {
        path: path_out.to_path_buf(),
        message: err.to_string(),
    };

    let mut writer = XlsxWriter::new(path_out.to_path_buf(), &derive_report_formats());
    for layout in &document.layouts {
        writer.write_sheet_layout(layout).map_err(to_write_failed)?;
    }
    writer.close().map_err(to_write_failed)
}

/// Assemble and persist the report; the caller picks the destination.
pub fn generate_report(
    path_da: Option<&Path>,
    path_inlets: Option<&Path>,
    path_out: &Path,
    options: &SpecReportOptions,
) -> Result<ReportAssemble, ReportError> {
    let document = assemble_report(path_da, path_inlets, options)?;
    write_report(&document, path_out)?;
    info!(path = %path_out.display(), "{}", document.report);
    Ok(document.report)
}
