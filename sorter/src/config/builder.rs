//! Layered configuration assembly.

use std::path::PathBuf;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds the effective configuration from defaults, the user file, the
/// environment and programmatic overrides, in rising precedence.
///
/// # Examples
///
/// ```
/// use sorter::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config { group: Some(true), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.group, Some(true));
/// assert_eq!(config.recursive, Some(false));
/// assert_eq!(config.ownership_marker(), ".sorter");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads the default data directory and the
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `config.yaml` from `data_dir` instead of the default location.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Do not read any configuration file.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `SORTER_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Assemble and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// an environment variable is malformed, or the result fails
    /// validation.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();
        if !self.skip_files {
            if let Some(source) = ConfigLoader::load_user_config(self.data_dir.as_deref())? {
                ConfigValidator::validate(&source.config)?;
                sources.push(source);
            }
        }

        let mut config = ConfigMerger::merge(Config::defaults(), sources);
        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }
        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
