use chrono::{SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::record::{FileExport, ScanExport};
use crate::classifier::{explain_unused_at, explain_zero_byte};
use crate::filter::{should_include, should_include_size, FilterConfig};
use crate::scanner::{size_mb, MetadataSource};

/// Threshold used for `is_unused` unless configured otherwise.
pub const DEFAULT_UNUSED_DAYS: u32 = 60;

/// Which candidate files end up in an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Every candidate whose metadata can be read; filters are not applied.
    #[default]
    All,
    /// Same path and size predicates as the distribution report.
    Filtered,
}

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub scope: ExportScope,
    pub unused_days: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scope: ExportScope::All,
            unused_days: DEFAULT_UNUSED_DAYS,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: ExportScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_unused_days(mut self, days: u32) -> Self {
        self.unused_days = days;
        self
    }
}

/// Turn a list of candidate files into a [`ScanExport`].
///
/// Unreadable files and directories are left out. All files are classified
/// against the same instant, the recorded scan time.
pub fn build_export<I, P, S>(
    paths: I,
    filter: &FilterConfig,
    scan_root: &Path,
    options: &ExportOptions,
    source: &mut S,
) -> ScanExport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    S: MetadataSource + ?Sized,
{
    let scan_time = Utc::now().trunc_subsecs(0);
    let filtered = options.scope == ExportScope::Filtered;

    let mut files = Vec::new();
    let mut total_size = 0u64;

    for path in paths {
        let path = path.as_ref();

        if filtered && !should_include(path, filter) {
            continue;
        }

        let meta = match source.metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                tracing::debug!(error = %err, "Skipping file in export");
                continue;
            }
        };

        if meta.is_directory {
            continue;
        }
        if filtered && !should_include_size(path, filter, meta.size_bytes) {
            continue;
        }

        total_size += meta.size_bytes;
        files.push(FileExport {
            path: meta.path.to_string_lossy().into_owned(),
            name: meta.name(),
            size_bytes: meta.size_bytes,
            size_mb: size_mb(meta.size_bytes),
            file_type: meta.file_type,
            created_at: meta.created_at,
            modified_at: meta.modified_at,
            accessed_at: meta.accessed_at,
            is_unused: explain_unused_at(&meta, options.unused_days, scan_time).is_some(),
            is_zero_byte: explain_zero_byte(&meta).is_some(),
        });
    }

    tracing::info!(
        root = %scan_root.display(),
        files = files.len(),
        bytes = total_size,
        scope = ?options.scope,
        "Export prepared"
    );

    ScanExport {
        scan_path: scan_root.to_string_lossy().into_owned(),
        scan_time,
        file_count: files.len(),
        total_size,
        filter_config: filter.clone(),
        files,
    }
}
