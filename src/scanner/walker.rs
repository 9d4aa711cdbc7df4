use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CensusError, Result};

use super::options::ScanOptions;

/// List every non-directory entry under `root`, in walk order.
///
/// The root itself must exist. Entries that fail during traversal
/// (permission denied, broken links) are skipped.
pub fn list_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>> {
    let root = root.canonicalize().map_err(|e| CensusError::Io {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut walker = WalkDir::new(&root).follow_links(options.follow_symlinks);
    if let Some(depth) = options.max_depth {
        walker = walker.max_depth(depth);
    }

    let mut files = Vec::new();
    let mut skipped = 0usize;

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(
                    path = ?err.path(),
                    error = %err,
                    "Skipping entry that failed during traversal"
                );
                skipped += 1;
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        files.push(entry.into_path());
    }

    tracing::debug!(
        root = %root.display(),
        files = files.len(),
        skipped,
        "Walk finished"
    );

    Ok(files)
}
