//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `SORTER_*` environment variables that
//! override configuration file values.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use sorter::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric bound or an invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(marker) = env::var("SORTER_OWNERSHIP_MARKER") {
            config.ownership_marker = Some(marker);
        }

        if let Ok(marker) = env::var("SORTER_IGNORE_MARKER") {
            config.ignore_marker = Some(marker);
        }

        if let Ok(val) = env::var("SORTER_RECURSIVE") {
            config.recursive = Some(Self::parse_bool("SORTER_RECURSIVE", &val)?);
        }

        if let Ok(val) = env::var("SORTER_GROUP") {
            config.group = Some(Self::parse_bool("SORTER_GROUP", &val)?);
        }

        if let Ok(val) = env::var("SORTER_BY_EXTENSION") {
            config.by_extension = Some(Self::parse_bool("SORTER_BY_EXTENSION", &val)?);
        }

        if let Ok(types) = env::var("SORTER_FILE_TYPES") {
            config.file_types = Some(Self::parse_list(&types));
        }

        if let Ok(attempts) = env::var("SORTER_MAX_NAME_ATTEMPTS") {
            config.max_name_attempts = Some(attempts.trim().parse().map_err(|_| {
                Error::Validation {
                    field: "SORTER_MAX_NAME_ATTEMPTS".into(),
                    message: "Must be a positive integer".into(),
                }
            })?);
        }

        if let Ok(seconds) = env::var("SORTER_MAXIMUM_LOCK_WAIT_SECONDS") {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: "SORTER_MAXIMUM_LOCK_WAIT_SECONDS".into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Split a comma-separated list, dropping blank items.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect()
    }
}
