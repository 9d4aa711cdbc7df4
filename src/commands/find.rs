//! Find command implementation

use anyhow::Result;
use chrono::Utc;

use crate::classifier::{explain_unused_at, explain_zero_byte};
use crate::cli::FindArgs;
use crate::config::Config;
use crate::filter::{should_include, should_include_size};
use crate::scanner::{format_size, DirectSource, MetadataSource};

/// Which rules `find` evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSelection {
    pub unused_days: Option<u32>,
    pub zero_byte: bool,
}

impl RuleSelection {
    /// No rule flag means both rules, with the configured threshold.
    pub fn from_args(args: &FindArgs, config: &Config) -> Self {
        let default_days = config.rules.unused_days;
        match (args.unused, args.zero_byte) {
            (None, false) => Self {
                unused_days: Some(default_days),
                zero_byte: true,
            },
            (unused, zero_byte) => Self {
                unused_days: unused.map(|days| days.unwrap_or(default_days)),
                zero_byte,
            },
        }
    }
}

/// Run the find command
pub fn run(args: FindArgs, config: &Config, quiet: bool) -> Result<()> {
    let filter = args.filter.apply_to(&config.filter);
    filter.validate()?;
    let rules = RuleSelection::from_args(&args, config);

    let collected = super::collect_files(&args.path, &args.filter, quiet)?;
    let filter = filter.with_scan_root(collected.root.clone());
    let files = collected.files;

    let now = Utc::now();
    let mut source = DirectSource;
    let mut unused_count = 0u64;
    let mut zero_count = 0u64;

    for path in &files {
        if !should_include(path, &filter) {
            continue;
        }
        let meta = match source.metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                tracing::debug!(error = %err, "Skipping file");
                continue;
            }
        };
        if !should_include_size(path, &filter, meta.size_bytes) {
            continue;
        }

        let mut reasons = Vec::new();
        if let Some(days) = rules.unused_days {
            if let Some(reason) = explain_unused_at(&meta, days, now) {
                unused_count += 1;
                reasons.push(format!("unused: {}", reason));
            }
        }
        if rules.zero_byte {
            if let Some(reason) = explain_zero_byte(&meta) {
                zero_count += 1;
                reasons.push(format!("zero-byte: {}", reason));
            }
        }

        if reasons.is_empty() {
            continue;
        }

        println!("{:>10}  {}", format_size(meta.size_bytes), meta.path.display());
        for reason in reasons {
            println!("{:>10}  - {}", "", reason);
        }
    }

    if !quiet {
        println!();
        let mut summary = Vec::new();
        if rules.unused_days.is_some() {
            summary.push(format!("{} unused", unused_count));
        }
        if rules.zero_byte {
            summary.push(format!("{} zero-byte", zero_count));
        }
        println!("Matched: {} ({} files scanned)", summary.join(", "), files.len());
    }

    Ok(())
}
