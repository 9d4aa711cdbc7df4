mod aggregate;
mod report;

pub use aggregate::{aggregate, aggregate_paths, Distribution, FileTypeStats};
pub use report::{render_distribution, ReportOptions};
