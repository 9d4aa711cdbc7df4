//! Machine-readable scan exports.

mod builder;
mod record;
mod writer;

pub use builder::{build_export, ExportOptions, ExportScope, DEFAULT_UNUSED_DAYS};
pub use record::{format_optional_timestamp, format_timestamp, FileExport, ScanExport};
pub use writer::{write_csv, write_json, CSV_HEADER};
