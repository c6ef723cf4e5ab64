//! Command to validate a sorter configuration file.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use sorter::config::{ConfigLoader, ConfigValidator, CONFIG_FILE_NAME};
use std::path::PathBuf;

/// Validate a sorter configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate (defaults to config.yaml in the data directory)
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let path = match self.config_path {
            Some(path) => path,
            None => resolve_data_dir(global)?.join(CONFIG_FILE_NAME),
        };

        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(&path)?;
        let config = match ConfigLoader::parse(&contents) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        match ConfigValidator::validate(&config) {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
