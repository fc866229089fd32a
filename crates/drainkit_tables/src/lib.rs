//! `drainkit_tables` v1:
//! Drainage-area and inlet flex-table exports -> plan-sheet report workbook.
//!
//! - `conf`         : header phrases, sheet texts, geometry, format presets
//! - `spec`         : fields, records, options, errors
//! - `config`       : JSON configuration overlay
//! - `resolve`      : header-phrase column resolution
//! - `reader`       : input grid -> typed records
//! - `link`         : drainage area -> inlet lookup
//! - `layout_da`    : Drainage Area Summary sheet
//! - `layout_inlet` : Inlets sheet
//! - `assemble`     : read, link, lay out, persist
//! - `report`       : run report model
//! - `util`         : pure helper functions
pub mod assemble;
pub mod conf;
pub mod config;
pub mod layout_da;
pub mod layout_inlet;
pub mod link;
pub mod reader;
pub mod report;
pub mod resolve;
pub mod spec;
pub mod util;

pub use assemble::{SpecReportDocument, assemble_report, generate_report, write_report};
pub use config::{SpecReportConfig, load_report_options};
pub use layout_da::build_drainage_area_layout;
pub use layout_inlet::build_inlet_layout;
pub use link::{SpecLinkIndex, build_link_index, lookup_drainage_area};
pub use reader::{parse_drainage_area_grid, parse_inlet_grid, read_drainage_areas, read_inlets};
pub use report::{ReportAssemble, ReportAssembleBuilder};
pub use resolve::{find_column, resolve_columns};
pub use spec::{
    EnumDaField, EnumInletField, ReportError, SemanticField, SpecDrainageAreaRecord,
    SpecFieldPhrases, SpecInletRecord, SpecReportOptions, SpecSemanticRow, SpecTableRead,
};
