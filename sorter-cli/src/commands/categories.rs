//! Command to print the extension table.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use sorter::classify::{extensions_for, Category};

/// List the categories and the extensions each one collects.
#[derive(Args)]
pub struct CategoriesCommand {
    /// Only show this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,
}

impl CategoriesCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let categories = match &self.category {
            Some(name) => {
                let category = Category::ALL
                    .into_iter()
                    .find(|c| c.label().eq_ignore_ascii_case(name.trim()))
                    .ok_or_else(|| {
                        CliError::InvalidArguments(format!("Unknown category: {name}"))
                    })?;
                vec![category]
            }
            None => Category::ALL.to_vec(),
        };

        for category in categories {
            println!(
                "{}\t{}",
                category.label(),
                extensions_for(category).join(", ")
            );
        }
        Ok(())
    }
}
