//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;
use crate::relocate::{
    FileRelocator, NameResolver, Sentinels, DEFAULT_IGNORE_MARKER, DEFAULT_MAX_NAME_ATTEMPTS,
    DEFAULT_OWNERSHIP_MARKER,
};

/// Default wait for the history database lock, in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that partial files and environment overrides
/// can be layered; [`ConfigBuilder`](super::ConfigBuilder) fills in the
/// defaults.
///
/// # Examples
///
/// ```
/// use sorter::config::Config;
///
/// let config: Config = serde_yaml::from_str("group: true\nfile_types: [pdf, docx]\n").unwrap();
/// assert_eq!(config.group, Some(true));
/// assert_eq!(config.file_types(), ["pdf", "docx"]);
/// assert_eq!(config.ownership_marker(), ".sorter");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the file marking engine-owned folders.
    pub ownership_marker: Option<String>,

    /// Name of the file marking folders the engine must not touch.
    pub ignore_marker: Option<String>,

    /// Sort subfolders by default.
    pub recursive: Option<bool>,

    /// Group into category folders by default.
    pub group: Option<bool>,

    /// Add an extension level below group folders by default.
    pub by_extension: Option<bool>,

    /// File types sorted when none are given.
    pub file_types: Option<Vec<String>>,

    /// Duplicate-name attempts before falling back to a hashed name.
    pub max_name_attempts: Option<u32>,

    /// Maximum time to wait for the history database lock (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// A configuration with every field set to its built-in default.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            ownership_marker: Some(DEFAULT_OWNERSHIP_MARKER.to_string()),
            ignore_marker: Some(DEFAULT_IGNORE_MARKER.to_string()),
            recursive: Some(false),
            group: Some(false),
            by_extension: Some(false),
            file_types: Some(vec!["*".to_string()]),
            max_name_attempts: Some(DEFAULT_MAX_NAME_ATTEMPTS),
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
        }
    }

    /// The ownership marker name.
    #[must_use]
    pub fn ownership_marker(&self) -> &str {
        self.ownership_marker
            .as_deref()
            .unwrap_or(DEFAULT_OWNERSHIP_MARKER)
    }

    /// The ignore marker name.
    #[must_use]
    pub fn ignore_marker(&self) -> &str {
        self.ignore_marker.as_deref().unwrap_or(DEFAULT_IGNORE_MARKER)
    }

    /// The default file-type filters.
    #[must_use]
    pub fn file_types(&self) -> &[String] {
        match &self.file_types {
            Some(types) if !types.is_empty() => types,
            _ => &[],
        }
    }

    /// The duplicate-name attempt bound.
    #[must_use]
    pub fn max_name_attempts(&self) -> u32 {
        self.max_name_attempts.unwrap_or(DEFAULT_MAX_NAME_ATTEMPTS)
    }

    /// The history database lock wait.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }

    /// Sentinel names from this configuration.
    #[must_use]
    pub fn sentinels(&self) -> Sentinels {
        Sentinels::new(self.ownership_marker(), self.ignore_marker())
    }

    /// A file relocator using this configuration's markers and name bound.
    #[must_use]
    pub fn file_relocator(&self) -> FileRelocator {
        FileRelocator::new(
            Classifier::new(),
            NameResolver::with_max_attempts(self.max_name_attempts()),
            self.sentinels(),
        )
    }
}
