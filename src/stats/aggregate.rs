use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::filter::{should_include, should_include_size, FilterConfig};
use crate::scanner::{DirectSource, MetadataSource};

/// Count and total size for one display category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTypeStats {
    pub file_type: String,
    pub count: u64,
    pub total_size_bytes: u64,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Sorted by descending count, then by label
    pub stats: Vec<FileTypeStats>,
    pub grand_count: u64,
    pub grand_size_bytes: u64,
}

impl Distribution {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Group the filtered files in `paths` by display category.
///
/// Files whose metadata cannot be read are skipped, so an unreadable file
/// shrinks the totals instead of failing the pass.
pub fn aggregate<I, P, S>(paths: I, filter: &FilterConfig, source: &mut S) -> Distribution
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
    S: MetadataSource + ?Sized,
{
    let mut by_type: HashMap<&'static str, FileTypeStats> = HashMap::new();
    let mut grand_count = 0u64;
    let mut grand_size_bytes = 0u64;
    let mut skipped = 0u64;

    for path in paths {
        let path = path.as_ref();

        if !should_include(path, filter) {
            continue;
        }

        let meta = match source.metadata(path) {
            Ok(meta) => meta,
            Err(err) => {
                tracing::debug!(error = %err, "Skipping file");
                skipped += 1;
                continue;
            }
        };

        if meta.is_directory || !should_include_size(path, filter, meta.size_bytes) {
            continue;
        }

        let label = meta.file_type.display_label();
        let entry = by_type.entry(label).or_insert_with(|| FileTypeStats {
            file_type: label.to_string(),
            count: 0,
            total_size_bytes: 0,
        });
        entry.count += 1;
        entry.total_size_bytes += meta.size_bytes;

        grand_count += 1;
        grand_size_bytes += meta.size_bytes;
    }

    let mut stats: Vec<FileTypeStats> = by_type.into_values().collect();
    stats.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.file_type.cmp(&b.file_type))
    });

    tracing::info!(
        files = grand_count,
        bytes = grand_size_bytes,
        types = stats.len(),
        skipped,
        "Aggregation complete"
    );

    Distribution {
        stats,
        grand_count,
        grand_size_bytes,
    }
}

/// [`aggregate`] with fresh extraction for every path.
pub fn aggregate_paths(paths: &[PathBuf], filter: &FilterConfig) -> Distribution {
    aggregate(paths, filter, &mut DirectSource)
}
