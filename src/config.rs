use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::export::{ExportScope, DEFAULT_UNUSED_DAYS};
use crate::filter::FilterConfig;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub filter: FilterConfig,
    pub rules: RulesConfig,
    pub report: ReportConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Days since last use after which a file counts as unused
    pub unused_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Width of the distribution bars
    pub bar_width: usize,
    /// Colour the report
    pub color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format used when `export` gets no --format: json, csv, both
    pub default_format: String,
    /// Apply the report filters to exports
    pub filtered: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            unused_days: DEFAULT_UNUSED_DAYS,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bar_width: 40,
            color: true,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            filtered: false,
        }
    }
}

impl ExportConfig {
    pub fn scope(&self) -> ExportScope {
        if self.filtered {
            ExportScope::Filtered
        } else {
            ExportScope::All
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is used when present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/file-census/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("file-census").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.rules.unused_days == 0 {
            return Err(ConfigError::Invalid(
                "rules.unused_days must be greater than 0".to_string(),
            ));
        }

        if self.report.bar_width == 0 || self.report.bar_width > 200 {
            return Err(ConfigError::Invalid(format!(
                "report.bar_width must be between 1 and 200, got {}",
                self.report.bar_width
            )));
        }

        if !matches!(self.export.default_format.as_str(), "json" | "csv" | "both") {
            return Err(ConfigError::Invalid(format!(
                "export.default_format must be json, csv or both, got '{}'",
                self.export.default_format
            )));
        }

        self.filter.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules.unused_days, 60);
        assert!(config.filter.is_permissive());
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[filter]"));
        assert!(toml_str.contains("[rules]"));
    }

    #[test]
    fn zero_unused_days_is_invalid() {
        let mut config = Config::default();
        config.rules.unused_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_export_format_is_invalid() {
        let mut config = Config::default();
        config.export.default_format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn export_scope_follows_flag() {
        let mut config = ExportConfig::default();
        assert_eq!(config.scope(), ExportScope::All);
        config.filtered = true;
        assert_eq!(config.scope(), ExportScope::Filtered);
    }
}
