//! Configuration structures for the fsvisit tool.
//!
//! - [`WalkConfig`] - Traversal settings (ordering, links, exclusion policy)
//! - [`RuleConfig`] - Predicate and exclusion rules wired by the entry point
//! - [`OutputConfig`] - What the entry point prints
//! - [`Config`] - Root configuration combining all settings
//!
//! Every section implements [`Default`] and deserializes with missing fields
//! filled in, so a configuration file only needs the values it overrides.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What happens when a `FilteredDirectoryFound` handler sets `exclude`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum FilteredExcludePolicy {
    /// The directory is neither yielded nor descended into.
    #[default]
    Prune,
    /// The directory itself is not yielded, but its contents are still walked.
    SkipYield,
}

impl FilteredExcludePolicy {
    /// Returns `true` if an excluded filtered directory is still descended into.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsv_core::FilteredExcludePolicy;
    ///
    /// assert!(!FilteredExcludePolicy::Prune.descends());
    /// assert!(FilteredExcludePolicy::SkipYield.descends());
    /// ```
    #[inline]
    #[must_use]
    pub const fn descends(self) -> bool {
        matches!(self, Self::SkipYield)
    }
}

/// Configuration for the tree walker.
///
/// # Examples
///
/// ```
/// use fsv_core::WalkConfig;
///
/// let config = WalkConfig::default();
/// assert!(config.sort_entries);
/// assert!(!config.follow_links);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Classify symbolic links by their target instead of the link itself.
    ///
    /// There is no cycle detection; a link back to an ancestor recurses
    /// until the filesystem refuses.
    pub follow_links: bool,

    /// Sort directory entries by file name before visiting them.
    ///
    /// When disabled, entries come in filesystem enumeration order.
    pub sort_entries: bool,

    /// Behavior of `exclude` set during a `FilteredDirectoryFound` notification.
    pub filtered_exclude: FilteredExcludePolicy,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            follow_links: false,
            sort_entries: true,
            filtered_exclude: FilteredExcludePolicy::Prune,
        }
    }
}

/// Predicate and handler rules applied by the entry point.
///
/// All patterns are plain substrings or suffixes of the full path string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Only paths ending with this suffix are filtered in. `None` accepts all.
    pub include_suffix: Option<String>,

    /// Files whose path contains any of these are excluded at `FileFound`.
    pub exclude_files: Vec<String>,

    /// Directories whose path contains any of these are excluded at `DirectoryFound`.
    pub exclude_dirs: Vec<String>,

    /// Entries whose path contains any of these abort their level.
    pub abort_on: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            include_suffix: Some(".txt".to_owned()),
            exclude_files: vec!["text4.txt".to_owned()],
            exclude_dirs: vec!["TestAbortFolder".to_owned()],
            abort_on: Vec::new(),
        }
    }
}

/// Output settings for the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print one line per notification.
    pub show_events: bool,

    /// Print a statistics summary after the walk.
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_events: true,
            summary: false,
        }
    }
}

/// Root configuration for the fsvisit tool.
///
/// # Examples
///
/// ```
/// use fsv_core::Config;
///
/// let config: Config = serde_json::from_str(r#"{"output": {"summary": true}}"#).unwrap();
/// assert!(config.output.summary);
/// assert!(config.output.show_events);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Walker configuration.
    pub walk: WalkConfig,

    /// Predicate and exclusion rules.
    pub rules: RuleConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Loads and validates a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not valid JSON for this structure, and
    /// [`ConfigError::InvalidOption`] if validation fails.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that no rule pattern is empty.
    ///
    /// An empty substring would match every path, which is never what a
    /// rule author meant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.include_suffix.as_deref() == Some("") {
            return Err(ConfigError::invalid_option(
                "rules.include_suffix",
                "suffix must not be empty",
            ));
        }

        let lists = [
            ("rules.exclude_files", &self.rules.exclude_files),
            ("rules.exclude_dirs", &self.rules.exclude_dirs),
            ("rules.abort_on", &self.rules.abort_on),
        ];
        for (option, patterns) in lists {
            if patterns.iter().any(String::is_empty) {
                return Err(ConfigError::invalid_option(
                    option,
                    "pattern must not be empty",
                ));
            }
        }

        Ok(())
    }
}

/// Validates a root directory given by the user.
///
/// # Errors
///
/// Returns [`ConfigError::EmptyPath`] for an empty path and
/// [`ConfigError::MissingDirectory`] if it does not name an existing directory.
///
/// # Examples
///
/// ```
/// use fsv_core::{ConfigError, validate_root_dir};
/// use camino::Utf8Path;
///
/// assert!(matches!(validate_root_dir(Utf8Path::new("")), Err(ConfigError::EmptyPath)));
/// ```
pub fn validate_root_dir(path: &Utf8Path) -> Result<(), ConfigError> {
    if path.as_str().is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    if !path.is_dir() {
        return Err(ConfigError::MissingDirectory(path.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_walk_config_defaults() {
        let config = WalkConfig::default();
        assert!(!config.follow_links);
        assert!(config.sort_entries);
        assert_eq!(config.filtered_exclude, FilteredExcludePolicy::Prune);
    }

    #[test]
    fn test_rule_config_defaults() {
        let config = RuleConfig::default();
        assert_eq!(config.include_suffix.as_deref(), Some(".txt"));
        assert_eq!(config.exclude_files, vec!["text4.txt"]);
        assert_eq!(config.exclude_dirs, vec!["TestAbortFolder"]);
        assert!(config.abort_on.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"walk": {"filtered_exclude": "skip_yield"}, "rules": {"include_suffix": null}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.walk.filtered_exclude, FilteredExcludePolicy::SkipYield);
        assert!(config.walk.sort_entries);
        assert!(config.rules.include_suffix.is_none());
        assert_eq!(config.rules.exclude_dirs, vec!["TestAbortFolder"]);
    }

    #[test]
    fn test_validate_rejects_empty_patterns() {
        let mut config = Config::default();
        config.rules.abort_on.push(String::new());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("rules.abort_on"));

        let mut config = Config::default();
        config.rules.include_suffix = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("fsvisit.json"))
            .expect("Invalid path");
        std::fs::write(&path, r#"{"rules": {"exclude_files": ["skip.txt"]}}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.rules.exclude_files, vec!["skip.txt"]);
    }

    #[test]
    fn test_from_json_file_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("broken.json"))
            .expect("Invalid path");

        assert!(matches!(
            Config::from_json_file(&path),
            Err(ConfigError::Io(_))
        ));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::from_json_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_root_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid path");

        assert!(validate_root_dir(&root).is_ok());
        assert!(matches!(
            validate_root_dir(&root.join("missing")),
            Err(ConfigError::MissingDirectory(_))
        ));

        let file = root.join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(matches!(
            validate_root_dir(&file),
            Err(ConfigError::MissingDirectory(_))
        ));
    }
}
