use humansize::{format_size as humansize_format, BINARY};

use crate::error::{CensusError, Result};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Format size in human-readable binary units
pub fn format_size(bytes: u64) -> String {
    humansize_format(bytes, BINARY)
}

/// Raw megabytes (MiB) as a float, no rounding
pub fn size_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Parse a size string like "1GB" or "512 KB" into bytes (binary units)
pub fn parse_size(s: &str) -> Result<u64> {
    let upper = s.trim().to_uppercase();

    let (num_str, unit) = if let Some(n) = upper.strip_suffix("TB") {
        (n, 1024u64.pow(4))
    } else if let Some(n) = upper.strip_suffix("GB") {
        (n, 1024u64.pow(3))
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, 1024u64.pow(2))
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1024u64)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1u64)
    } else {
        (upper.as_str(), 1u64)
    };

    let value = num_str
        .trim()
        .parse::<f64>()
        .map_err(|_| CensusError::InvalidSize(s.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(CensusError::InvalidSize(s.to_string()));
    }

    Ok((value * unit as f64) as u64)
}

/// `clap` value parser wrapper around [`parse_size`]
pub fn parse_size_arg(s: &str) -> std::result::Result<u64, String> {
    parse_size(s).map_err(|e| e.to_string())
}
