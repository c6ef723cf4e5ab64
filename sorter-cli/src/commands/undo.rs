//! Undo command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, shorten_path, GlobalOptions};
use clap::Args;
use sorter::{execute_undo, init_logger, UndoOptions, UndoPlan};

/// Move files back to where a sort run found them.
#[derive(Args)]
pub struct UndoCommand {
    /// Reverse the newest N moves instead of the latest run
    #[arg(long, short = 'n', value_name = "N")]
    pub count: Option<usize>,

    /// Show what would be restored without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

impl UndoCommand {
    /// Execute the undo command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.count == Some(0) {
            return Err(CliError::InvalidArguments(
                "--count must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let logger = init_logger(global.verbose, global.quiet);
        let mut db = open_database(global, &config)?;

        let options = UndoOptions::new()
            .with_count(self.count)
            .with_dry_run(self.dry_run);
        let mut plan = UndoPlan::new(options);
        plan.build(&db).map_err(CliError::from)?;

        if plan.is_empty() {
            if !global.quiet {
                eprintln!("Nothing to undo");
            }
            return Ok(());
        }

        let result = execute_undo(&plan, &mut db).map_err(CliError::from)?;

        let verb = if result.dry_run { "Would restore" } else { "Restored" };
        for (from, to) in &result.restored {
            println!("{verb} {} -> {}", shorten_path(from), shorten_path(to));
        }
        for (path, reason) in &result.skipped {
            logger.warn(&format!("Skipped {}: {reason}", shorten_path(path)));
        }

        if result.restored.is_empty() {
            return Err(CliError::SemanticFailure(
                "No moves could be undone".to_string(),
            ));
        }
        Ok(())
    }
}
