//! XLSX writer kernel that renders sheet layouts into workbook output.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::{debug, info};

use crate::conf::N_LEN_EXCEL_SHEET_NAME_MAX;
use crate::spec::{EnumCellValue, SpecCellFormat, SpecSheetLayout, XlsxIoError};
use crate::util::{derive_merge_tracker, sanitize_sheet_name, validate_sheet_layout};

/// Stateful workbook writer.
///
/// The workbook is buffered in memory until [`Self::close`] is called, so a
/// failed sheet never leaves a half-written file behind.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    dict_fmt: BTreeMap<String, Format>,
    set_sheet_names_existing: BTreeSet<String>,
    l_sheet_names: Vec<String>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path and a named format table.
    pub fn new(path_file_out: PathBuf, dict_fmt_spec: &BTreeMap<String, SpecCellFormat>) -> Self {
        let dict_fmt = dict_fmt_spec
            .iter()
            .map(|(key, spec)| (key.clone(), derive_rust_xlsx_format(spec)))
            .collect();
        Self {
            path_file_out,
            workbook: Workbook::new(),
            dict_fmt,
            set_sheet_names_existing: BTreeSet::new(),
            l_sheet_names: Vec::new(),
            if_closed: false,
        }
    }

    /// Sheet names written so far, in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.l_sheet_names
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxIoError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        info!(path = %self.path_file_out.display(), n_sheets = self.l_sheet_names.len(), "workbook saved");
        Ok(())
    }

    /// Append one sheet rendered from `layout`; returns the final sheet name.
    pub fn write_sheet_layout(&mut self, layout: &SpecSheetLayout) -> Result<String, XlsxIoError> {
        if self.if_closed {
            return Err(XlsxIoError::Closed);
        }
        validate_sheet_layout(layout)?;
        for cell in layout.cells.values() {
            if !self.dict_fmt.contains_key(&cell.fmt_key) {
                return Err(XlsxIoError::InvalidLayout(format!(
                    "unknown format key: {:?}",
                    cell.fmt_key
                )));
            }
        }

        let sheet_name_unique =
            self.derive_unique_sheet_name(&sanitize_sheet_name(&layout.sheet_name, "_"));
        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for (col_idx, width) in &layout.col_widths {
            worksheet.set_column_width(cast_col_num(*col_idx)?, *width)?;
        }
        for (row_idx, height) in &layout.row_heights {
            worksheet.set_row_height(cast_row_num(*row_idx)?, *height)?;
        }

        let fmt_blank = Format::new();
        for merge in &layout.merges {
            let cell_anchor = layout.cells.get(&(merge.row_start, merge.col_start));
            let fmt_anchor = cell_anchor
                .and_then(|cell| self.dict_fmt.get(&cell.fmt_key))
                .unwrap_or(&fmt_blank);
            let c_text = match cell_anchor.map(|cell| &cell.value) {
                Some(EnumCellValue::String(val)) => val.as_str(),
                _ => "",
            };
            worksheet.merge_range(
                cast_row_num(merge.row_start)?,
                cast_col_num(merge.col_start)?,
                cast_row_num(merge.row_end)?,
                cast_col_num(merge.col_end)?,
                c_text,
                fmt_anchor,
            )?;
        }

        let set_merge_anchors: BTreeSet<(usize, usize)> = layout
            .merges
            .iter()
            .map(|merge| (merge.row_start, merge.col_start))
            .collect();
        let set_merged_cells = derive_merge_tracker(&layout.merges);

        for ((row_idx, col_idx), cell) in &layout.cells {
            if set_merged_cells.contains(&(*row_idx, *col_idx)) {
                continue;
            }
            // Text anchors were written by merge_range; numbers still need a cell write.
            if set_merge_anchors.contains(&(*row_idx, *col_idx))
                && !matches!(cell.value, EnumCellValue::Number(_))
            {
                continue;
            }
            let format = &self.dict_fmt[&cell.fmt_key];
            write_cell_with_format(worksheet, *row_idx, *col_idx, &cell.value, format)?;
        }

        debug!(
            sheet = %sheet_name_unique,
            n_cells = layout.cells.len(),
            n_merges = layout.merges.len(),
            "sheet layout written"
        );
        self.l_sheet_names.push(sheet_name_unique.clone());
        Ok(sheet_name_unique)
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(name) {
            self.set_sheet_names_existing.insert(name.to_string());
            return name.to_string();
        }

        let base_name: String = name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), XlsxIoError> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) if val.is_empty() => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = spec.rotation {
        format = format.set_rotation(val);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.top {
        format = format.set_border_top(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }
    if let Some(val) = spec.left {
        format = format.set_border_left(derive_format_border(val));
    }
    if let Some(val) = spec.right {
        format = format.set_border_right(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "justify" => Some(FormatAlign::Justify),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32, XlsxIoError> {
    u32::try_from(value).map_err(|_| XlsxIoError::InvalidLayout(format!("row index overflow: {value}")))
}

fn cast_col_num(value: usize) -> Result<u16, XlsxIoError> {
    u16::try_from(value)
        .map_err(|_| XlsxIoError::InvalidLayout(format!("column index overflow: {value}")))
}
