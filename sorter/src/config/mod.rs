//! Configuration for sort runs.
//!
//! Settings come from four layers, highest precedence first:
//!
//! 1. Programmatic overrides (via [`ConfigBuilder::with_config`])
//! 2. Environment variables (`SORTER_*`)
//! 3. The user file `config.yaml` in the data directory
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```
//! use sorter::config::ConfigBuilder;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("config.yaml"), "ignore_marker: .dontsort\n").unwrap();
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(dir.path())
//!     .skip_env()
//!     .build()
//!     .unwrap();
//! assert_eq!(config.ignore_marker(), ".dontsort");
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
