//! Where the aggregation and export passes get their metadata from.
//!
//! [`DirectSource`] stats the filesystem on every request. [`ScanCache`]
//! memoizes by path and is meant to live no longer than one top-level scan:
//! create it inside the command, pass it to every pass, drop it at the end.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{CensusError, Result};

use super::metadata::{extract, FileMetadata};

/// Supplies metadata for a path.
pub trait MetadataSource {
    fn metadata(&mut self, path: &Path) -> Result<FileMetadata>;
}

/// Re-extracts on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectSource;

impl MetadataSource for DirectSource {
    fn metadata(&mut self, path: &Path) -> Result<FileMetadata> {
        extract(path)
    }
}

/// Scan-scoped memoization of extraction results, failures included.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: HashMap<PathBuf, std::result::Result<FileMetadata, String>>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for ScanCache {
    fn metadata(&mut self, path: &Path) -> Result<FileMetadata> {
        let cached = self
            .entries
            .entry(path.to_path_buf())
            .or_insert_with(|| extract(path).map_err(|e| e.to_string()));

        match cached {
            Ok(meta) => Ok(meta.clone()),
            Err(message) => Err(CensusError::Metadata {
                path: path.to_path_buf(),
                source: std::io::Error::other(message.clone()),
            }),
        }
    }
}
