//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including path resolution, configuration loading, database management,
//! progress rendering and output formatting.

use crate::error::CliError;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use sorter::config::ConfigBuilder;
use sorter::database::{default_data_dir, DATABASE_FILE_NAME};
use sorter::{Config, Database, DatabaseConfig, Logger, ProgressEvent, ProgressSink, Severity};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,
}

/// Resolve a path, using CWD if not specified.
///
/// Paths are made absolute and `~` is expanded, but symlinks are not
/// followed and the path does not need to exist.
pub fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    let path_to_resolve = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };
    normalize_path(&path_to_resolve)
}

/// Normalize a path (make absolute, expand ~, etc.) without following symlinks.
pub fn normalize_path(path: &Path) -> Result<PathBuf, CliError> {
    sorter::path::normalize::normalize(path).map_err(CliError::from)
}

/// Resolve the data directory: `--data-dir` (or `SORTER_DATA_DIR`), else
/// `~/.sorter`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => normalize_path(dir),
        None => default_data_dir().map_err(|_| CliError::NoDataDirectory),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;
    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open the history database with configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE_NAME);

    let timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => Duration::from_secs(config.lock_wait_seconds()),
    };
    let db_config = DatabaseConfig::new(db_path).with_busy_timeout(timeout);

    Database::open(db_config).map_err(CliError::from)
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

/// Renders engine progress through the stderr [`Logger`].
///
/// Milestones and info messages appear with `--verbose`; warnings and
/// errors at the normal level.
#[derive(Debug, Clone, Copy)]
pub struct LoggerSink {
    logger: Logger,
}

impl LoggerSink {
    /// Creates a sink writing through `logger`.
    pub const fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl ProgressSink for LoggerSink {
    fn report(&mut self, event: &ProgressEvent) {
        match event.severity {
            Severity::Info => self.logger.progress(event.percent, &event.message),
            Severity::Warning => self.logger.warn(&event.message),
            Severity::Error => self.logger.error(&event.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        use std::time::{Duration, UNIX_EPOCH};
        let st = UNIX_EPOCH + Duration::from_secs(1705323045); // 2024-01-15 10:30:45 UTC
        assert_eq!(format_timestamp(st), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let global = GlobalOptions {
            verbose: false,
            quiet: false,
            data_dir: Some(PathBuf::from("/srv/sorter")),
            busy_timeout: None,
        };
        assert_eq!(
            resolve_data_dir(&global).unwrap(),
            PathBuf::from("/srv/sorter")
        );
    }

    #[test]
    fn test_resolve_relative_path_is_absolute() {
        let resolved = resolve_path(Some(PathBuf::from("inbox"))).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("inbox"));
    }
}
