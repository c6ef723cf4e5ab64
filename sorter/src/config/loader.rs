//! Configuration file loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the user configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A parsed configuration file.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```
/// use sorter::config::ConfigLoader;
///
/// let dir = tempfile::tempdir().unwrap();
/// assert!(ConfigLoader::load_user_config(Some(dir.path())).unwrap().is_none());
///
/// std::fs::write(dir.path().join("config.yaml"), "recursive: true\n").unwrap();
/// let source = ConfigLoader::load_user_config(Some(dir.path())).unwrap().unwrap();
/// assert_eq!(source.config.recursive, Some(true));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `config.yaml` from `data_dir`, or from the default data
    /// directory when `data_dir` is `None`.
    ///
    /// A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if no data directory can be determined.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let path = Self::user_config_path(data_dir)?;
        if !path.exists() {
            log::debug!("no configuration file at {}", path.display());
            return Ok(None);
        }
        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(Some(ConfigSource { path, config }))
    }

    /// Path of the user configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if `data_dir` is `None` and the default data
    /// directory cannot be determined.
    pub fn user_config_path(data_dir: Option<&Path>) -> Result<PathBuf> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::database::resolve_data_dir()?,
        };
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from YAML text. An empty document is an empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the YAML is invalid or has
    /// unknown fields.
    pub fn parse(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "group: [not, a, bool").unwrap();
        assert!(matches!(
            ConfigLoader::load_file(&config_path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_load_unknown_field() {
        assert!(ConfigLoader::parse("colour: blue\n").is_err());
    }

    #[test]
    fn test_empty_file_is_empty_config() {
        assert_eq!(ConfigLoader::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_user_config_path_with_data_dir() {
        let path = ConfigLoader::user_config_path(Some(Path::new("/data"))).unwrap();
        assert_eq!(path, Path::new("/data/config.yaml"));
    }
}
