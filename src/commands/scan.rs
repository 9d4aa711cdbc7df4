//! Scan command implementation

use anyhow::Result;
use std::io::IsTerminal;

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::stats::{aggregate_paths, render_distribution, ReportOptions};

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, quiet: bool) -> Result<()> {
    let filter = args.filter.apply_to(&config.filter);
    filter.validate()?;

    tracing::info!(path = %args.path.display(), "Scanning directory");

    let collected = super::collect_files(&args.path, &args.filter, quiet)?;
    let filter = filter.with_scan_root(collected.root.clone());

    let distribution = aggregate_paths(&collected.files, &filter);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&distribution)?);
        return Ok(());
    }

    let colors = config.report.color && !args.no_color && std::io::stdout().is_terminal();
    print!("{}", render_distribution(&distribution, &report_options(config, colors)));

    Ok(())
}

pub(crate) fn report_options(config: &Config, colors: bool) -> ReportOptions {
    ReportOptions::new()
        .with_bar_width(config.report.bar_width)
        .with_colors(colors)
}
