pub mod export;
pub mod find;
pub mod scan;

use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::FilterArgs;
use crate::error::{CensusError, Result};
use crate::scanner::list_files;

/// Files found under a scan root, along with the canonical root itself.
pub(crate) struct Collected {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Walk `root` with a spinner on stderr (hidden when quiet or not a terminal).
pub(crate) fn collect_files(root: &Path, args: &FilterArgs, quiet: bool) -> Result<Collected> {
    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };
    spinner.set_message(format!("Scanning {}...", root.display()));

    let result = list_files(root, &args.scan_options());
    spinner.finish_and_clear();

    let files = result?;
    let root = root.canonicalize().map_err(|e| CensusError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;
    tracing::info!(root = %root.display(), files = files.len(), "Collected candidate files");
    Ok(Collected { root, files })
}
