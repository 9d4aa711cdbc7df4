//! Extension-based file categories.
//!
//! The category of a file is a pure function of its path: content is never
//! inspected. Anything the table does not recognise is [`FileType::Unknown`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Coarse category derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "pdf")]
    Pdf,
    #[serde(rename = "txt")]
    Text,
    #[serde(rename = "doc")]
    Document,
    #[serde(rename = "spreadsheet")]
    Spreadsheet,
    #[serde(rename = "presentation")]
    Presentation,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "audio")]
    Audio,
    #[serde(rename = "archive")]
    Archive,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "executable")]
    Executable,
    Unknown,
}

impl FileType {
    /// Categorise a path by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Categorise a bare extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();

        match ext.as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" | "log" => FileType::Text,
            "doc" | "docx" | "odt" | "rtf" | "md" | "epub" => FileType::Document,
            "xls" | "xlsx" | "ods" | "csv" | "tsv" => FileType::Spreadsheet,
            "ppt" | "pptx" | "odp" | "key" => FileType::Presentation,
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" | "tif" | "tiff"
            | "heic" | "heif" | "psd" | "raw" => FileType::Image,
            "mp4" | "mkv" | "avi" | "mov" | "wmv" | "flv" | "webm" | "m4v" | "mpg" | "mpeg" => {
                FileType::Video
            }
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" | "opus" => FileType::Audio,
            "zip" | "rar" | "7z" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "zst" | "iso" | "dmg" => {
                FileType::Archive
            }
            "rs" | "py" | "js" | "ts" | "jsx" | "tsx" | "c" | "cpp" | "h" | "hpp" | "cs"
            | "java" | "go" | "rb" | "php" | "swift" | "kt" | "scala" | "html" | "css" | "json"
            | "xml" | "yaml" | "yml" | "toml" | "sql" | "sh" | "ps1" => FileType::Code,
            "exe" | "msi" | "dll" | "so" | "dylib" | "bin" | "appimage" | "deb" | "rpm" => {
                FileType::Executable
            }
            _ => FileType::Unknown,
        }
    }

    /// Internal tag, as stored in exports.
    pub fn tag(self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Text => "txt",
            FileType::Document => "doc",
            FileType::Spreadsheet => "spreadsheet",
            FileType::Presentation => "presentation",
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Audio => "audio",
            FileType::Archive => "archive",
            FileType::Code => "code",
            FileType::Executable => "executable",
            FileType::Unknown => "Unknown",
        }
    }

    /// User-facing label used by the distribution report.
    pub fn display_label(self) -> &'static str {
        match self {
            FileType::Unknown => "Other",
            other => other.tag(),
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
