mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use drainkit_tables::{generate_report, load_report_options};
use tracing::info;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut options = load_report_options(args.path_config.as_deref())
        .context("Failed to load configuration")?;
    if args.trim_link_keys {
        options.if_trim_link_keys = true;
    }

    info!(
        drainage_areas = ?args.path_da,
        inlets = ?args.path_inlets,
        output = %args.path_out.display(),
        "generating drainage tables"
    );
    let report = generate_report(
        args.path_da.as_deref(),
        args.path_inlets.as_deref(),
        &args.path_out,
        &options,
    )
    .context("Failed to generate drainage tables")?;

    println!("Tables generated successfully!");
    println!();
    println!("DA records: {}", report.cnt_da_records);
    println!("Inlet records: {}", report.cnt_inlet_records);
    println!("Inlets linked: {}", report.cnt_inlets_linked);
    println!();
    println!("Saved to: {}", args.path_out.display());
    Ok(())
}
