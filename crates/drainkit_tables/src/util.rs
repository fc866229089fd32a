//! Pure helpers for cell conversion and derived display values.

use drainkit_io_xlsx::EnumCellValue;

use crate::conf::C_DESCRIPTION_PATH_SEP;

////////////////////////////////////////////////////////////////////////////////
// #region CellConversion

/// Text view of a cell; numbers render in shortest form (`101.0` -> `"101"`).
pub fn derive_text_value(value: &EnumCellValue) -> Option<String> {
    match value {
        EnumCellValue::None => None,
        EnumCellValue::String(s) => Some(s.clone()),
        EnumCellValue::Number(n) => Some(n.to_string()),
    }
}

/// Numeric view of a cell.
///
/// Blank text is null. Non-numeric text is returned as `Err` with the
/// offending text so callers can report it.
pub fn derive_number_value(value: &EnumCellValue) -> Result<Option<f64>, String> {
    match value {
        EnumCellValue::None => Ok(None),
        EnumCellValue::Number(n) if n.is_finite() => Ok(Some(*n)),
        EnumCellValue::Number(_) => Ok(None),
        EnumCellValue::String(s) => {
            let c_trimmed = s.trim();
            if c_trimmed.is_empty() {
                return Ok(None);
            }
            match c_trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(s.clone()),
            }
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DerivedValues

/// Short inlet type from a catalog path, e.g. `Node\...\CI Des 2 STD` -> `CI Des 2 STD`.
pub fn extract_inlet_type(description: Option<&str>) -> String {
    let Some(description) = description else {
        return String::new();
    };
    description
        .split(C_DESCRIPTION_PATH_SEP)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or_default()
        .to_string()
}

/// `"STATION, Offset: OFFSET"`; a zero or missing offset is left out.
pub fn format_station_offset(station: Option<&str>, offset: Option<f64>) -> String {
    let mut l_parts = Vec::with_capacity(2);
    if let Some(station) = station {
        l_parts.push(station.to_string());
    }
    if let Some(offset) = offset
        && offset != 0.0
    {
        l_parts.push(format!("Offset: {offset}"));
    }
    l_parts.join(", ")
}

/// Flow arriving at an inlet: captured plus carry-over.
///
/// Null only when both operands are null; a single null operand counts as zero.
pub fn sum_flow_at_inlet(flow_captured: Option<f64>, flow_total_bypassed: Option<f64>) -> Option<f64> {
    match (flow_captured, flow_total_bypassed) {
        (None, None) => None,
        (captured, bypassed) => Some(captured.unwrap_or(0.0) + bypassed.unwrap_or(0.0)),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
