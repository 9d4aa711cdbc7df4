//! Platform-specific timestamps.
//!
//! Creation and access times are not uniformly available through portable
//! APIs. Each target gets a [`PlatformTimes`] provider; every provider is
//! best-effort and reports `None` for anything it cannot supply.

use chrono::{DateTime, Utc};
use std::fs::Metadata;
use std::path::Path;

/// Creation and last-access time for one path. `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendedTimes {
    pub created_at: Option<DateTime<Utc>>,
    pub accessed_at: Option<DateTime<Utc>>,
}

/// Source of the timestamps the portable accessors do not provide.
///
/// Providers read from the metadata the extractor already fetched and must
/// not stat the path again.
pub trait PlatformTimes {
    /// Look up extended times for `path`. Must not fail the extraction:
    /// anything unavailable is left as `None`.
    fn times(&self, path: &Path, metadata: &Metadata) -> ExtendedTimes;
}

/// Provider that never knows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlatformTimes;

impl PlatformTimes for NoPlatformTimes {
    fn times(&self, _path: &Path, _metadata: &Metadata) -> ExtendedTimes {
        ExtendedTimes::default()
    }
}

/// Convert seconds/nanoseconds since the Unix epoch, treating the epoch
/// itself and anything before it as unknown.
pub(crate) fn from_unix(secs: i64, nanos: u32) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, nanos)
}

pub(crate) fn from_system_time(time: std::time::SystemTime) -> Option<DateTime<Utc>> {
    let since_epoch = time.duration_since(std::time::UNIX_EPOCH).ok()?;
    from_unix(since_epoch.as_secs() as i64, since_epoch.subsec_nanos())
}

#[cfg(unix)]
mod unix {
    use super::{from_system_time, from_unix, ExtendedTimes, PlatformTimes};
    use std::fs::Metadata;
    use std::os::unix::fs::MetadataExt;
    use std::path::Path;

    /// `st_atime` for access time, `statx` birth time for creation time.
    /// Both come from the one stat result std already holds.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UnixTimes;

    impl PlatformTimes for UnixTimes {
        fn times(&self, path: &Path, metadata: &Metadata) -> ExtendedTimes {
            let accessed_at = from_unix(metadata.atime(), metadata.atime_nsec() as u32);

            let created_at = match metadata.created() {
                Ok(time) => from_system_time(time),
                Err(err) => {
                    tracing::trace!(path = %path.display(), %err, "birth time unavailable");
                    None
                }
            };

            ExtendedTimes {
                created_at,
                accessed_at,
            }
        }
    }
}

#[cfg(windows)]
mod windows {
    use super::{from_unix, ExtendedTimes, PlatformTimes};
    use std::fs::Metadata;
    use std::os::windows::fs::MetadataExt;
    use std::path::Path;

    /// 100ns intervals between 1601-01-01 and 1970-01-01.
    const FILETIME_UNIX_OFFSET: u64 = 116_444_736_000_000_000;

    fn from_filetime(ticks: u64) -> Option<chrono::DateTime<chrono::Utc>> {
        let since_epoch = ticks.checked_sub(FILETIME_UNIX_OFFSET)?;
        let secs = (since_epoch / 10_000_000) as i64;
        let nanos = ((since_epoch % 10_000_000) * 100) as u32;
        from_unix(secs, nanos)
    }

    /// File attribute data (creation / last access FILETIMEs).
    #[derive(Debug, Clone, Copy, Default)]
    pub struct WindowsTimes;

    impl PlatformTimes for WindowsTimes {
        fn times(&self, _path: &Path, metadata: &Metadata) -> ExtendedTimes {
            ExtendedTimes {
                created_at: from_filetime(metadata.creation_time()),
                accessed_at: from_filetime(metadata.last_access_time()),
            }
        }
    }
}

#[cfg(unix)]
pub use unix::UnixTimes as NativeTimes;

#[cfg(windows)]
pub use windows::WindowsTimes as NativeTimes;

#[cfg(not(any(unix, windows)))]
pub use NoPlatformTimes as NativeTimes;
