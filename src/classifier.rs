//! "Unused" and "zero-byte" rules.
//!
//! Each rule returns an explanation when it matches, because the text is shown
//! to operators by `find`. Exports only keep whether a rule matched.

use chrono::{DateTime, Duration, Utc};

use crate::scanner::FileMetadata;

/// Per-file rule outcome, recomputed whenever it is needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub unused_reason: Option<String>,
    pub zero_byte_reason: Option<String>,
}

impl Classification {
    pub fn is_unused(&self) -> bool {
        self.unused_reason.is_some()
    }

    pub fn is_zero_byte(&self) -> bool {
        self.zero_byte_reason.is_some()
    }
}

/// Evaluate both rules at `now`.
pub fn classify(meta: &FileMetadata, threshold_days: u32, now: DateTime<Utc>) -> Classification {
    Classification {
        unused_reason: explain_unused_at(meta, threshold_days, now),
        zero_byte_reason: explain_zero_byte(meta),
    }
}

/// [`explain_unused_at`] evaluated at the current instant.
pub fn explain_unused(meta: &FileMetadata, threshold_days: u32) -> Option<String> {
    explain_unused_at(meta, threshold_days, Utc::now())
}

/// A file is unused when its last access (or last modification, if the
/// access time is unknown) is strictly more than `threshold_days` before
/// `now`. Nothing is reported when both timestamps are unknown.
pub fn explain_unused_at(
    meta: &FileMetadata,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Option<String> {
    if meta.is_directory {
        return None;
    }

    let (last_use, source) = match (meta.accessed_at, meta.modified_at) {
        (Some(accessed), _) => (accessed, "accessed"),
        (None, Some(modified)) => (modified, "modified"),
        (None, None) => return None,
    };

    let age = now.signed_duration_since(last_use);
    if age <= Duration::days(i64::from(threshold_days)) {
        return None;
    }

    Some(format!(
        "last {} {} days ago ({}), threshold is {} days",
        source,
        age.num_days(),
        last_use.format("%Y-%m-%d"),
        threshold_days
    ))
}

/// Matches regular files of exactly zero bytes.
pub fn explain_zero_byte(meta: &FileMetadata) -> Option<String> {
    if meta.is_file && meta.size_bytes == 0 {
        Some("file is empty (0 bytes)".to_string())
    } else {
        None
    }
}
