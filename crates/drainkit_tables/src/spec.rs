//! Semantic fields, typed records, options and errors.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use drainkit_io_xlsx::EnumCellValue;
use thiserror::Error;

use crate::conf::{C_LABEL_STATUS_DEFAULT, TUP_DA_FIELD_PHRASES, TUP_INLET_FIELD_PHRASES};

////////////////////////////////////////////////////////////////////////////////
// #region SemanticFields

/// A named column of one input table, matched by header phrases.
pub trait SemanticField: Copy + Ord + fmt::Debug + 'static {
    /// Every field of the table, in declaration order.
    const ALL: &'static [Self];

    /// Stable snake_case name used in configuration and warnings.
    fn name(&self) -> &'static str;

    /// Look a field up by its snake_case name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// Fields of the drainage-area summary export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumDaField {
    /// Drainage area designation (row key).
    Designation,
    /// Structure the area drains into (link key).
    OutflowStructure,
    /// Area in acres.
    AreaAcres,
    /// Time of concentration in minutes.
    TcMin,
    /// Runoff coefficient "C".
    RunoffCoeff,
    /// Rainfall intensity in in/hr.
    Intensity,
    /// Rational peak flow in cfs.
    FlowCfs,
}

impl SemanticField for EnumDaField {
    const ALL: &'static [Self] = &[
        Self::Designation,
        Self::OutflowStructure,
        Self::AreaAcres,
        Self::TcMin,
        Self::RunoffCoeff,
        Self::Intensity,
        Self::FlowCfs,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::Designation => "designation",
            Self::OutflowStructure => "outflow_structure",
            Self::AreaAcres => "area_acres",
            Self::TcMin => "tc_min",
            Self::RunoffCoeff => "runoff_coeff",
            Self::Intensity => "intensity",
            Self::FlowCfs => "flow_cfs",
        }
    }
}

/// Fields of the inlet design record export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumInletField {
    StructureNo,
    Alignment,
    Station,
    Offset,
    StructureType,
    /// Backslash-delimited catalog path; the last segment is the inlet type.
    Description,
    ElevationRim,
    FlowCaptured,
    FlowBypassedRational,
    FlowTotalBypassed,
    CaptureEfficiency,
    MaxSpread,
    HglOut,
    EglOut,
    BypassTarget,
}

impl SemanticField for EnumInletField {
    const ALL: &'static [Self] = &[
        Self::StructureNo,
        Self::Alignment,
        Self::Station,
        Self::Offset,
        Self::StructureType,
        Self::Description,
        Self::ElevationRim,
        Self::FlowCaptured,
        Self::FlowBypassedRational,
        Self::FlowTotalBypassed,
        Self::CaptureEfficiency,
        Self::MaxSpread,
        Self::HglOut,
        Self::EglOut,
        Self::BypassTarget,
    ];

    fn name(&self) -> &'static str {
        match self {
            Self::StructureNo => "structure_no",
            Self::Alignment => "alignment",
            Self::Station => "station",
            Self::Offset => "offset",
            Self::StructureType => "structure_type",
            Self::Description => "description",
            Self::ElevationRim => "elevation_rim",
            Self::FlowCaptured => "flow_captured",
            Self::FlowBypassedRational => "flow_bypassed_rational",
            Self::FlowTotalBypassed => "flow_total_bypassed",
            Self::CaptureEfficiency => "capture_efficiency",
            Self::MaxSpread => "max_spread",
            Self::HglOut => "hgl_out",
            Self::EglOut => "egl_out",
            Self::BypassTarget => "bypass_target",
        }
    }
}

/// Ordered `(field, phrases)` priority table.
///
/// Within one field, earlier phrases win over later ones regardless of
/// which header column they appear in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFieldPhrases<F> {
    entries: Vec<(F, Vec<String>)>,
}

impl<F: SemanticField> SpecFieldPhrases<F> {
    /// Build from a static table such as [`TUP_DA_FIELD_PHRASES`].
    pub fn from_static(table: &[(F, &[&str])]) -> Self {
        Self {
            entries: table
                .iter()
                .map(|(field, l_phrases)| {
                    (*field, l_phrases.iter().map(ToString::to_string).collect())
                })
                .collect(),
        }
    }

    /// Entries in evaluation order.
    pub fn entries(&self) -> &[(F, Vec<String>)] {
        &self.entries
    }

    /// Phrases configured for `field`, if any.
    pub fn phrases(&self, field: F) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(field_entry, _)| *field_entry == field)
            .map(|(_, l_phrases)| l_phrases.as_slice())
    }

    /// Replace the phrase list of `field`, appending the field if it was absent.
    pub fn set_phrases(&mut self, field: F, l_phrases: Vec<String>) {
        match self.entries.iter_mut().find(|(field_entry, _)| *field_entry == field) {
            Some((_, l_phrases_old)) => *l_phrases_old = l_phrases,
            None => self.entries.push((field, l_phrases)),
        }
    }
}

/// One input row projected onto the resolved fields; unresolved fields are absent.
pub type SpecSemanticRow<F> = BTreeMap<F, EnumCellValue>;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Records

/// One drainage area, identified by its row position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecDrainageAreaRecord {
    pub designation: Option<String>,
    pub outflow_structure: Option<String>,
    pub area_acres: Option<f64>,
    pub tc_min: Option<f64>,
    pub runoff_coeff: Option<f64>,
    pub intensity: Option<f64>,
    pub flow_cfs: Option<f64>,
}

/// One inlet structure.
///
/// `elevation_rim`, `capture_efficiency`, `hgl_out` and `egl_out` are parsed
/// but not placed by the current layouts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecInletRecord {
    pub structure_no: Option<String>,
    pub alignment: Option<String>,
    pub station: Option<String>,
    pub offset: Option<f64>,
    pub structure_type: Option<String>,
    pub description: Option<String>,
    pub elevation_rim: Option<f64>,
    pub flow_captured: Option<f64>,
    pub flow_bypassed_rational: Option<f64>,
    pub flow_total_bypassed: Option<f64>,
    pub capture_efficiency: Option<f64>,
    pub max_spread: Option<f64>,
    pub hgl_out: Option<f64>,
    pub egl_out: Option<f64>,
    pub bypass_target: Option<String>,
}

/// Records of one table plus the fields no header matched.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecTableRead<R> {
    pub records: Vec<R>,
    pub fields_unresolved: Vec<&'static str>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Run-wide options for reading, linking and layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecReportOptions {
    /// Header phrases for the drainage-area table.
    pub phrases_da: SpecFieldPhrases<EnumDaField>,
    /// Header phrases for the inlet table.
    pub phrases_inlet: SpecFieldPhrases<EnumInletField>,
    /// Text of the merged status label in the inlet table.
    pub label_status: String,
    /// Trim `structure_no` before the link lookup (the index side is always trimmed).
    pub if_trim_link_keys: bool,
}

impl Default for SpecReportOptions {
    fn default() -> Self {
        Self {
            phrases_da: SpecFieldPhrases::from_static(&TUP_DA_FIELD_PHRASES),
            phrases_inlet: SpecFieldPhrases::from_static(&TUP_INLET_FIELD_PHRASES),
            label_status: C_LABEL_STATUS_DEFAULT.to_string(),
            if_trim_link_keys: false,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Run-level failures; each aborts the run before any output is saved.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Neither input path was supplied.
    #[error("No input selected: supply a drainage-area file, an inlet file, or both.")]
    NoInputSelected,
    /// A supplied input path does not exist.
    #[error("Cannot find input file: {}", .0.display())]
    InputNotFound(PathBuf),
    /// A supplied input could not be opened or parsed.
    #[error("Cannot read input file {}: {message}", path.display())]
    UnreadableInput {
        /// Input path.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },
    /// Configuration file is unreadable or holds unknown keys.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Output document could not be rendered or saved.
    #[error("Cannot write output file {}: {message}", path.display())]
    WriteFailed {
        /// Destination path.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
