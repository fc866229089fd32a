//! Header phrases, sheet texts and styling presets.
//!
//! Layout builders only reference the format keys below; fonts, borders,
//! widths and heights live here so layouts can be tested without a writer.

use std::collections::BTreeMap;

use drainkit_io_xlsx::SpecCellFormat;

use crate::spec::{EnumDaField, EnumInletField};

////////////////////////////////////////////////////////////////////////////////
// #region HeaderPhrases

/// Drainage-area header phrases, most specific first within each field.
pub const TUP_DA_FIELD_PHRASES: [(EnumDaField, &[&str]); 7] = [
    (EnumDaField::Designation, &["DRAINAGE AREA DESIGNATION"]),
    (EnumDaField::OutflowStructure, &["OUTFLOW STRUCTURE"]),
    (
        EnumDaField::AreaAcres,
        &["DRAINAGE AREA (ACRE", "DRAINAGE AREA(ACRE"],
    ),
    (EnumDaField::TcMin, &["TIME OF CONCENTRATION"]),
    (EnumDaField::RunoffCoeff, &["RUNOFF COEFFICIENT"]),
    (
        EnumDaField::Intensity,
        &["CATCHMENT INTENSITY", "INTENSITY"],
    ),
    (
        EnumDaField::FlowCfs,
        &["CATCHMENT RATIONAL FLOW", "RATIONAL FLOW"],
    ),
];

/// Inlet header phrases, most specific first within each field.
pub const TUP_INLET_FIELD_PHRASES: [(EnumInletField, &[&str]); 15] = [
    (EnumInletField::StructureNo, &["STRUCTURE NO"]),
    (EnumInletField::Alignment, &["ALIGNMENT"]),
    (EnumInletField::Station, &["STATION"]),
    (EnumInletField::Offset, &["OFFSET"]),
    (EnumInletField::StructureType, &["STRUCTURE TYPE"]),
    (EnumInletField::Description, &["DESCRIPTION"]),
    (EnumInletField::ElevationRim, &["ELEVATION (RIM)", "ELEVATION"]),
    (EnumInletField::FlowCaptured, &["FLOW (CAPTURED)", "CAPTURED"]),
    (EnumInletField::FlowBypassedRational, &["BYPASSED RATIONAL"]),
    (EnumInletField::FlowTotalBypassed, &["TOTAL BYPASSED"]),
    (EnumInletField::CaptureEfficiency, &["CAPTURE EFFICIENCY"]),
    (EnumInletField::MaxSpread, &["SPREAD"]),
    (EnumInletField::HglOut, &["HYDRAULIC GRADE"]),
    (EnumInletField::EglOut, &["ENERGY GRADE"]),
    (EnumInletField::BypassTarget, &["BYPASS TARGET"]),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetTexts

/// Default merged label in the inlet table's leading column.
pub const C_LABEL_STATUS_DEFAULT: &str = "PROPOSED";
/// Default output file name offered by the shell.
pub const C_FILE_OUT_DEFAULT: &str = "ODOT_Drainage_Tables.xlsx";
/// Separator of the inlet `description` catalog path.
pub const C_DESCRIPTION_PATH_SEP: char = '\\';

pub const C_SHEET_DA: &str = "Drainage Area Summary";
pub const C_TITLE_DA: &str = "DRAINAGE AREA SUMMARY";
pub const C_SHEET_INLET: &str = "Inlets";
pub const C_TITLE_INLET: &str = "DRAINAGE STRUCTURE DESIGN RECORD - INLETS";

/// Drainage-area columns A-D, each merged over both header rows.
pub const TUP_DA_SINGLE_HEADERS: [&str; 4] = [
    "DRAINAGE AREA DESIGNATION",
    "DRAINAGE AREA (ACRE)",
    "TOTAL TC (MIN)",
    "RUNOFF COEFF. \"C\"",
];
pub const C_DA_GROUP_INTENSITY: &str = "RAINFALL INTENSITY (IN/HR)";
pub const C_DA_GROUP_FLOW: &str = "PEAK FLOW (CFS)";
/// Storm frequencies under each drainage-area group header.
pub const TUP_DA_STORM_YEARS: [&str; 4] = ["10 YEAR", "25 YEAR", "50 YEAR", "100 YEAR"];

/// One inlet table column (B-V): header text, width, rotated header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecInletColumn {
    pub header: &'static str,
    pub width: f64,
    pub if_rotated: bool,
}

const fn inlet_col(header: &'static str, width: f64, if_rotated: bool) -> SpecInletColumn {
    SpecInletColumn {
        header,
        width,
        if_rotated,
    }
}

/// Inlet columns B through V, in sheet order.
pub const TUP_INLET_COLUMNS: [SpecInletColumn; 21] = [
    inlet_col("STRUCTURE NUMBER", 10.44, true),
    inlet_col("ALIGNMENT", 6.0, true),
    inlet_col("STATION, OFFSET", 16.11, false),
    inlet_col("INLET TYPE", 14.33, false),
    inlet_col("DESCRIPTION", 16.55, false),
    inlet_col("DESIGN YEAR", 8.33, false),
    inlet_col("DRAINAGE AREA", 8.11, true),
    inlet_col("AREA (ACRE)", 5.89, true),
    inlet_col("C VALUE", 13.0, true),
    inlet_col("Tc (MINUTES)", 5.66, true),
    inlet_col("INTENSITY (IN/HR)", 6.0, true),
    inlet_col(" FLOW RATE INITIAL (Qi) (CFS)", 5.66, true),
    inlet_col("GRADE \"SL\" (ft/ft)", 6.33, true),
    inlet_col("CROSS SLOPE \"Sx\" (ft/ft)", 5.89, true),
    inlet_col("CARRY OVER (CFS)", 6.0, true),
    inlet_col("SUM Q AT INLETS (CFS)", 5.44, true),
    inlet_col("DEPTH AT INLET (FT)", 7.33, true),
    inlet_col("SPREAD AT INLET (FT)", 7.33, true),
    inlet_col("BYPASS(CFS)", 13.0, true),
    inlet_col("BYPASS TO INLET", 6.33, true),
    inlet_col("COMMENTS", 23.44, false),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Geometry

/// Drainage-area column widths, A through L.
pub const TUP_DA_COL_WIDTHS: [f64; 12] = [
    15.55, 11.55, 10.33, 10.89, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0, 13.0,
];
pub const N_DA_ROW_TITLE: usize = 1;
pub const N_DA_ROW_HEADER: usize = 2;
pub const N_DA_ROW_SUBHEADER: usize = 3;
pub const N_DA_ROW_DATA_START: usize = 4;
pub const N_DA_HEIGHT_TITLE: f64 = 15.75;
pub const N_DA_HEIGHT_HEADER: f64 = 18.75;
pub const N_DA_HEIGHT_SUBHEADER: f64 = 24.75;

pub const N_INLET_WIDTH_LABEL: f64 = 4.44;
pub const N_INLET_ROW_TITLE: usize = 0;
pub const N_INLET_ROW_HEADER_START: usize = 1;
pub const N_INLET_ROW_HEADER_END: usize = 3;
pub const N_INLET_ROW_DATA_START: usize = 4;
/// Heights of inlet rows 1-4 (title, then the three header rows).
pub const TUP_INLET_HEIGHTS_HEADER: [f64; 4] = [16.5, 80.25, 18.75, 27.0];

pub const N_HEIGHT_DATA_ROW: f64 = 15.75;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatPresets

pub const C_FMT_TITLE: &str = "title";
pub const C_FMT_TITLE_RULED: &str = "title_ruled";
pub const C_FMT_HEADER: &str = "header";
pub const C_FMT_HEADER_ROTATED: &str = "header_rotated";
pub const C_FMT_DATA: &str = "data";
pub const C_FMT_LABEL: &str = "label";

/// Build the named format table shared by both report sheets.
pub fn derive_report_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_center = SpecCellFormat {
        font_name: Some("Arial".to_string()),
        font_size: Some(10),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };
    let cfg_center_wrap = cfg_center.with_(SpecCellFormat {
        text_wrap: Some(true),
        ..Default::default()
    });
    let cfg_header = cfg_center_wrap.with_(SpecCellFormat {
        border: Some(1),
        ..Default::default()
    });

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert(C_FMT_TITLE.to_string(), cfg_center_wrap.clone());
    dict_fmt.insert(
        C_FMT_TITLE_RULED.to_string(),
        cfg_center_wrap.with_(SpecCellFormat {
            top: Some(1),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        C_FMT_HEADER_ROTATED.to_string(),
        cfg_header.with_(SpecCellFormat {
            rotation: Some(90),
            ..Default::default()
        }),
    );
    dict_fmt.insert(C_FMT_HEADER.to_string(), cfg_header);
    dict_fmt.insert(
        C_FMT_DATA.to_string(),
        cfg_center.with_(SpecCellFormat {
            border: Some(1),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        C_FMT_LABEL.to_string(),
        cfg_center.with_(SpecCellFormat {
            font_name: Some("Calibri".to_string()),
            rotation: Some(90),
            top: Some(1),
            ..Default::default()
        }),
    );

    dict_fmt
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
