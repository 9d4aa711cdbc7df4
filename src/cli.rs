use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::filter::FilterConfig;
use crate::scanner::{parse_size_arg, ScanOptions};

/// File Census - inventory a directory tree by file type, find unused and empty files
#[derive(Parser, Debug)]
#[command(name = "file-census")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "FILE_CENSUS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the file type distribution of a directory
    Scan(ScanArgs),

    /// List unused and zero-byte files with the reason they matched
    Find(FindArgs),

    /// Export per-file metadata as JSON and/or CSV
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Walk and filter flags shared by every scanning command
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only count these extensions (comma-separated)
    #[arg(long = "ext", value_delimiter = ',', value_name = "EXTS")]
    pub extensions: Vec<String>,

    /// Never count these extensions (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "EXTS")]
    pub exclude_ext: Vec<String>,

    /// Skip files under directories with this name
    #[arg(long, value_name = "NAME")]
    pub exclude_dir: Vec<String>,

    /// Skip paths matching this glob pattern
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Minimum file size (e.g. 10KB, 1.5MB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg)]
    pub min_size: Option<u64>,

    /// Maximum file size (e.g. 1GB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size_arg)]
    pub max_size: Option<u64>,

    /// Skip hidden files and directories
    #[arg(long)]
    pub no_hidden: bool,

    /// Maximum recursion depth
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,
}

impl FilterArgs {
    /// Layer the command-line flags over the configured filter.
    /// List flags extend the configured lists; scalar flags replace them.
    pub fn apply_to(&self, base: &FilterConfig) -> FilterConfig {
        let mut filter = base.clone();
        filter
            .include_extensions
            .extend(self.extensions.iter().cloned());
        filter
            .exclude_extensions
            .extend(self.exclude_ext.iter().cloned());
        filter.exclude_dirs.extend(self.exclude_dir.iter().cloned());
        filter
            .exclude_patterns
            .extend(self.exclude.iter().cloned());
        if self.min_size.is_some() {
            filter.min_size = self.min_size;
        }
        if self.max_size.is_some() {
            filter.max_size = self.max_size;
        }
        if self.no_hidden {
            filter.include_hidden = false;
        }
        filter
    }

    pub fn scan_options(&self) -> ScanOptions {
        let options = ScanOptions::new().with_follow_symlinks(self.follow_symlinks);
        match self.max_depth {
            Some(depth) => options.with_max_depth(depth),
            None => options,
        }
    }
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Output the distribution as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Files not used for more than DAYS days, given as --unused=DAYS
    /// (configured threshold if no value)
    #[arg(long, value_name = "DAYS", num_args = 0..=1, require_equals = true)]
    pub unused: Option<Option<u32>>,

    /// Files of exactly zero bytes
    #[arg(long)]
    pub zero_byte: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Both,
}

impl ExportFormat {
    pub fn from_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "csv" => ExportFormat::Csv,
            "both" => ExportFormat::Both,
            _ => ExportFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Directory to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output file (with --format both, the base name for .json and .csv)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Export format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Apply the filters to exported files as well
    #[arg(long)]
    pub filtered: bool,

    /// Threshold for the is_unused column
    #[arg(long, value_name = "DAYS")]
    pub unused_days: Option<u32>,

    #[command(flatten)]
    pub filter: FilterArgs,
}
