//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use sorter::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::defaults()).unwrap();
///
/// let clash = Config {
///     ownership_marker: Some(".same".into()),
///     ignore_marker: Some(".same".into()),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&clash).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(marker) = &config.ownership_marker {
            Self::validate_marker("ownership_marker", marker)?;
        }
        if let Some(marker) = &config.ignore_marker {
            Self::validate_marker("ignore_marker", marker)?;
        }
        if config.ownership_marker() == config.ignore_marker() {
            return Err(Error::Validation {
                field: "ignore_marker".into(),
                message: "Must differ from ownership_marker".into(),
            });
        }

        if let Some(types) = &config.file_types {
            for file_type in types {
                Self::validate_file_type(file_type)?;
            }
        }

        if config.max_name_attempts == Some(0) {
            return Err(Error::Validation {
                field: "max_name_attempts".into(),
                message: "Must be greater than 0".into(),
            });
        }

        if config.maximum_lock_wait_seconds == Some(0) {
            return Err(Error::Validation {
                field: "maximum_lock_wait_seconds".into(),
                message: "Timeout must be greater than 0".into(),
            });
        }

        Ok(())
    }

    /// Marker names are single dot-prefixed file names.
    fn validate_marker(field: &str, name: &str) -> Result<()> {
        let invalid = |message: &str| Error::Validation {
            field: field.into(),
            message: message.into(),
        };
        if name.trim().is_empty() {
            return Err(invalid("Cannot be empty or only whitespace"));
        }
        if !name.starts_with('.') || name == "." || name == ".." {
            return Err(invalid("Must be a dot-prefixed file name"));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(invalid("Cannot contain path separators"));
        }
        Ok(())
    }

    /// File types are bare extensions (an optional leading dot is allowed)
    /// or `*`.
    fn validate_file_type(file_type: &str) -> Result<()> {
        let trimmed = file_type.trim();
        let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if trimmed == "*" {
            return Ok(());
        }
        if bare.is_empty() || bare.contains(['.', '/', '\\', '*', '?', '[', ']', '{', '}']) {
            return Err(Error::Validation {
                field: "file_types".into(),
                message: format!("'{file_type}' is not a file extension"),
            });
        }
        Ok(())
    }
}
