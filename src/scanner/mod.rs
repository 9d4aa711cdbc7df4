mod file_type;
mod metadata;
mod options;
pub mod platform;
mod size;
mod source;
mod walker;

pub use file_type::FileType;
pub use metadata::{extract, extract_with, FileMetadata};
pub use options::ScanOptions;
pub use platform::{ExtendedTimes, NativeTimes, NoPlatformTimes, PlatformTimes};
pub use size::{format_size, parse_size, parse_size_arg, size_mb};
pub use source::{DirectSource, MetadataSource, ScanCache};
pub use walker::list_files;
