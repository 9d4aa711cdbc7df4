//! Inclusion predicates.
//!
//! Both predicates are pure functions of their arguments. Callers check
//! [`should_include`] first and only fetch metadata for paths that pass it,
//! then check [`should_include_size`]. A file counts only if both agree.

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::ConfigError;

/// Per-scan inclusion rules. The default value admits everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Only these extensions are counted (empty = all)
    pub include_extensions: Vec<String>,
    /// Extensions that are never counted
    pub exclude_extensions: Vec<String>,
    /// Directory names; any path passing through one is excluded
    pub exclude_dirs: Vec<String>,
    /// Glob patterns matched against the full path
    pub exclude_patterns: Vec<String>,
    /// Count dot-files and files under dot-directories
    pub include_hidden: bool,
    /// Inclusive lower size bound in bytes
    pub min_size: Option<u64>,
    /// Inclusive upper size bound in bytes
    pub max_size: Option<u64>,
    /// Directory being scanned. The hidden and directory rules only look at
    /// components below it, so a scan of `~/.config/app` still counts files.
    #[serde(skip)]
    pub scan_root: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_extensions: vec![],
            exclude_extensions: vec![],
            exclude_dirs: vec![],
            exclude_patterns: vec![],
            include_hidden: true,
            min_size: None,
            max_size: None,
            scan_root: None,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(ConfigError::Invalid(format!(
                    "filter.min_size ({}) must not exceed filter.max_size ({})",
                    min, max
                )));
            }
        }

        for pattern in &self.exclude_patterns {
            Pattern::new(pattern).map_err(|e| {
                ConfigError::Invalid(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }

    pub fn with_scan_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scan_root = Some(root.into());
        self
    }

    /// True when no predicate can reject anything.
    pub fn is_permissive(&self) -> bool {
        let baseline = Self {
            scan_root: self.scan_root.clone(),
            ..Self::default()
        };
        *self == baseline
    }

    /// The part of `path` the hidden and directory rules apply to.
    fn below_root<'a>(&self, path: &'a Path) -> &'a Path {
        self.scan_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
    }
}

fn normalize_ext(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(normalize_ext)
}

fn is_hidden(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') && name != "." && name != ".."
        }
        _ => false,
    })
}

/// Path-based predicate: extensions, excluded directories, glob patterns and
/// the hidden-file rule.
///
/// With a `scan_root` set, the hidden and directory rules ignore the root's
/// own ancestors. Glob patterns always see the full path.
pub fn should_include(path: &Path, config: &FilterConfig) -> bool {
    let relative = config.below_root(path);

    if !config.include_hidden && is_hidden(relative) {
        return false;
    }

    let ext = extension_of(path);

    if !config.include_extensions.is_empty() {
        let allowed = ext.as_ref().is_some_and(|ext| {
            config
                .include_extensions
                .iter()
                .any(|e| normalize_ext(e) == *ext)
        });
        if !allowed {
            return false;
        }
    }

    if let Some(ext) = &ext {
        if config
            .exclude_extensions
            .iter()
            .any(|e| normalize_ext(e) == *ext)
        {
            return false;
        }
    }

    if !config.exclude_dirs.is_empty() {
        // The last component is the file itself
        let parent = relative.parent().unwrap_or(Path::new(""));
        for component in parent.components() {
            if let Component::Normal(name) = component {
                let name = name.to_string_lossy();
                if config.exclude_dirs.iter().any(|d| name == d.as_str()) {
                    return false;
                }
            }
        }
    }

    // Patterns are checked at config load; anything malformed never matches
    !config
        .exclude_patterns
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .any(|pattern| pattern.matches_path(path))
}

/// Size-based predicate. Never touches the filesystem.
pub fn should_include_size(_path: &Path, config: &FilterConfig, size_bytes: u64) -> bool {
    if config.min_size.is_some_and(|min| size_bytes < min) {
        return false;
    }
    if config.max_size.is_some_and(|max| size_bytes > max) {
        return false;
    }
    true
}
