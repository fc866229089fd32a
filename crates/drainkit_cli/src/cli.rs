use std::path::PathBuf;

use clap::Parser;
use drainkit_tables::conf::C_FILE_OUT_DEFAULT;

/// Build ODOT drainage plan-sheet tables from flex-table exports.
///
/// Supply a drainage-area summary export, an inlet export, or both. When
/// both are given, each inlet is linked to the drainage area whose outflow
/// structure matches its structure number.
#[derive(Parser, Debug)]
#[command(name = "drainkit", version, about, long_about = None)]
pub struct Args {
    /// Drainage-area summary export (.xlsx)
    #[arg(long = "drainage-areas", value_name = "XLSX")]
    pub path_da: Option<PathBuf>,

    /// Inlet design record export (.xlsx)
    #[arg(long = "inlets", value_name = "XLSX")]
    pub path_inlets: Option<PathBuf>,

    /// Destination workbook
    #[arg(short = 'o', long = "output", value_name = "XLSX", default_value = C_FILE_OUT_DEFAULT)]
    pub path_out: PathBuf,

    /// JSON file overriding header phrases, status label or link trimming
    #[arg(short = 'c', long = "config", value_name = "JSON")]
    pub path_config: Option<PathBuf>,

    /// Trim structure numbers before linking them to drainage areas
    #[arg(long)]
    pub trim_link_keys: bool,

    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}
