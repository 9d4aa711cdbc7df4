use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CensusError, Result};

use super::file_type::FileType;
use super::platform::{from_system_time, NativeTimes, PlatformTimes};

/// Normalized metadata for one filesystem entry.
///
/// Timestamps are `None` when the platform could not supply them. `None`
/// means "unknown", never "epoch".
#[derive(Debug, Clone, PartialEq)]
pub struct FileMetadata {
    /// Path as given to the extractor
    pub path: PathBuf,

    /// Apparent size in bytes
    pub size_bytes: u64,

    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub accessed_at: Option<DateTime<Utc>>,

    pub is_file: bool,
    pub is_directory: bool,

    /// Category derived from the extension
    pub file_type: FileType,
}

impl FileMetadata {
    /// Final path component, or the whole path when there is none.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Extract metadata for `path` using the native platform time provider.
pub fn extract(path: &Path) -> Result<FileMetadata> {
    extract_with(path, &NativeTimes)
}

/// Extract metadata for `path`, enriching timestamps through `provider`.
///
/// The path is stat'ed once. Only that call can fail the extraction; the
/// provider works from its result and is best-effort.
pub fn extract_with<P: PlatformTimes + ?Sized>(path: &Path, provider: &P) -> Result<FileMetadata> {
    let metadata = fs::metadata(path).map_err(|e| CensusError::Metadata {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_directory = metadata.is_dir();
    let extended = provider.times(path, &metadata);

    Ok(FileMetadata {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        created_at: extended.created_at,
        modified_at: metadata.modified().ok().and_then(from_system_time),
        accessed_at: extended.accessed_at,
        is_file: !is_directory,
        is_directory,
        file_type: FileType::from_path(path),
    })
}
