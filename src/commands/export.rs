//! Export command implementation

use anyhow::{bail, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::{ExportArgs, ExportFormat};
use crate::config::Config;
use crate::export::{build_export, write_csv, write_json, ExportOptions, ExportScope, ScanExport};
use crate::scanner::ScanCache;
use crate::stats::{aggregate, render_distribution};

/// Destination files for a format. `Both` derives `.json` and `.csv`
/// siblings from the given base path.
pub fn destinations(format: ExportFormat, output: &Path) -> Vec<(ExportFormat, PathBuf)> {
    match format {
        ExportFormat::Json => vec![(ExportFormat::Json, output.to_path_buf())],
        ExportFormat::Csv => vec![(ExportFormat::Csv, output.to_path_buf())],
        ExportFormat::Both => vec![
            (ExportFormat::Json, output.with_extension("json")),
            (ExportFormat::Csv, output.with_extension("csv")),
        ],
    }
}

/// Run the export command
pub fn run(args: ExportArgs, config: &Config, quiet: bool) -> Result<()> {
    let filter = args.filter.apply_to(&config.filter);
    filter.validate()?;

    let format = args
        .format
        .unwrap_or_else(|| ExportFormat::from_config(&config.export.default_format));
    let scope = if args.filtered {
        ExportScope::Filtered
    } else {
        config.export.scope()
    };
    let options = ExportOptions::new()
        .with_scope(scope)
        .with_unused_days(args.unused_days.unwrap_or(config.rules.unused_days));

    if scope == ExportScope::Filtered && filter.is_permissive() {
        tracing::debug!("Filtered export requested but no filter is active");
    }

    let collected = super::collect_files(&args.path, &args.filter, quiet)?;
    let filter = filter.with_scan_root(collected.root.clone());

    // The report and the export read each file once between them
    let mut cache = ScanCache::new();
    let distribution = aggregate(&collected.files, &filter, &mut cache);
    if !quiet {
        let colors = config.report.color && std::io::stdout().is_terminal();
        print!(
            "{}",
            render_distribution(&distribution, &super::scan::report_options(config, colors))
        );
        println!();
    }

    let export = build_export(&collected.files, &filter, &collected.root, &options, &mut cache);
    tracing::debug!(cached = cache.len(), "Metadata cache after export");

    let mut failures = 0;
    for (kind, dest) in destinations(format, &args.output) {
        match write_one(&export, kind, &dest) {
            Ok(()) => {
                if !quiet {
                    println!(
                        "Exported {} files ({} bytes) to {}",
                        export.file_count,
                        export.total_size,
                        dest.display()
                    );
                }
            }
            Err(err) => {
                tracing::error!(path = %dest.display(), error = %err, "Export failed");
                eprintln!("Error: {}", err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} export(s) failed", failures);
    }

    Ok(())
}

fn write_one(export: &ScanExport, kind: ExportFormat, dest: &Path) -> crate::error::Result<()> {
    match kind {
        ExportFormat::Csv => write_csv(export, dest),
        _ => write_json(export, dest),
    }
}
