use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::record::{format_optional_timestamp, ScanExport};
use crate::error::{CensusError, ExportError, Result};

/// Column order of the CSV export.
pub const CSV_HEADER: [&str; 10] = [
    "Path",
    "Name",
    "Size_Bytes",
    "Size_MB",
    "File_Type",
    "Created_At",
    "Modified_At",
    "Accessed_At",
    "Is_Unused",
    "Is_Zero_Byte",
];

/// Write `export` as indented JSON.
pub fn write_json(export: &ScanExport, dest: &Path) -> Result<()> {
    write_atomically(dest, |file| {
        serde_json::to_writer_pretty(&mut *file, export)?;
        file.write_all(b"\n")?;
        Ok(())
    })?;

    tracing::info!(path = %dest.display(), files = export.file_count, "Wrote JSON export");
    Ok(())
}

/// Write `export` as CSV, one row per file.
pub fn write_csv(export: &ScanExport, dest: &Path) -> Result<()> {
    write_atomically(dest, |file| {
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;

        for record in &export.files {
            writer.write_record([
                record.path.clone(),
                record.name.clone(),
                record.size_bytes.to_string(),
                format!("{:.2}", record.size_mb),
                record.file_type.tag().to_string(),
                format_optional_timestamp(&record.created_at),
                format_optional_timestamp(&record.modified_at),
                format_optional_timestamp(&record.accessed_at),
                record.is_unused.to_string(),
                record.is_zero_byte.to_string(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    })?;

    tracing::info!(path = %dest.display(), files = export.file_count, "Wrote CSV export");
    Ok(())
}

/// Write into a temporary file next to `dest`, then rename it into place.
/// On failure `dest` is left as it was.
fn write_atomically<F>(dest: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> std::result::Result<(), ExportError>,
{
    let wrap = |source: ExportError| CensusError::Export {
        path: dest.to_path_buf(),
        source,
    };

    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| wrap(e.into()))?;
    write(tmp.as_file_mut()).map_err(wrap)?;
    tmp.as_file_mut().sync_all().map_err(|e| wrap(e.into()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(|e| wrap(e.into()))?;
    }

    tmp.persist(dest).map_err(|e| wrap(e.error.into()))?;
    Ok(())
}
