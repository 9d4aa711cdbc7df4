use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::FilterConfig;
use crate::scanner::FileType;

/// One exported file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileExport {
    pub path: String,
    pub name: String,
    pub size_bytes: u64,
    pub size_mb: f64,
    pub file_type: FileType,
    #[serde(with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option")]
    pub accessed_at: Option<DateTime<Utc>>,
    pub is_unused: bool,
    pub is_zero_byte: bool,
}

/// A complete scan, ready to be written as JSON or CSV.
///
/// `file_count == files.len()` and `total_size` is the sum of
/// `files[].size_bytes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanExport {
    pub scan_path: String,
    #[serde(with = "timestamp")]
    pub scan_time: DateTime<Utc>,
    pub file_count: usize,
    pub total_size: u64,
    pub filter_config: FilterConfig,
    pub files: Vec<FileExport>,
}

/// Text form shared by both export formats: RFC 3339, UTC, whole seconds.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Unknown timestamps render as an empty string.
pub fn format_optional_timestamp(time: &Option<DateTime<Utc>>) -> String {
    time.as_ref().map(format_timestamp).unwrap_or_default()
}

pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            time: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(time) => super::serialize(time, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let text: Option<String> = Option::deserialize(deserializer)?;
            text.map(|text| {
                DateTime::parse_from_rfc3339(&text)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FileExport {
        FileExport {
            path: "/data/report.pdf".to_string(),
            name: "report.pdf".to_string(),
            size_bytes: 1024,
            size_mb: 1024.0 / (1024.0 * 1024.0),
            file_type: FileType::Pdf,
            created_at: None,
            modified_at: DateTime::from_timestamp(1_700_000_000, 123_456_789),
            accessed_at: DateTime::from_timestamp(1_700_000_100, 0),
            is_unused: false,
            is_zero_byte: false,
        }
    }

    #[test]
    fn test_timestamp_format() {
        let time = DateTime::from_timestamp(1_700_000_000, 999_000_000).unwrap();
        assert_eq!(format_timestamp(&time), "2023-11-14T22:13:20Z");
        assert_eq!(format_optional_timestamp(&None), "");
    }

    #[test]
    fn test_json_field_names_and_values() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["path"], "/data/report.pdf");
        assert_eq!(value["size_bytes"], 1024);
        assert_eq!(value["file_type"], "pdf");
        assert_eq!(value["created_at"], serde_json::Value::Null);
        assert_eq!(value["modified_at"], "2023-11-14T22:13:20Z");
        assert_eq!(value["is_unused"], false);
        assert_eq!(value["is_zero_byte"], false);
    }

    #[test]
    fn test_deserialize_accepts_offsets() {
        let json = r#"{
            "path": "a", "name": "a", "size_bytes": 0, "size_mb": 0.0,
            "file_type": "Unknown", "created_at": null,
            "modified_at": "2024-01-01T02:00:00+02:00", "accessed_at": null,
            "is_unused": false, "is_zero_byte": true
        }"#;
        let parsed: FileExport = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.file_type, FileType::Unknown);
        assert_eq!(
            parsed.modified_at.map(|t| format_timestamp(&t)),
            Some("2024-01-01T00:00:00Z".to_string())
        );
    }
}
