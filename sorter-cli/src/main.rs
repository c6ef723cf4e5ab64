//! Main entry point for the sorter CLI.
//!
//! - `sort`: Sort a folder into extension and category folders
//! - `history`: Show the most recent moves
//! - `undo`: Reverse the latest run

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
    };

    let result = match cli.command {
        cli::Command::Sort(cmd) => cmd.execute(&global),
        cli::Command::History(cmd) => cmd.execute(&global),
        cli::Command::Undo(cmd) => cmd.execute(&global),
        cli::Command::Categories(cmd) => cmd.execute(&global),
        cli::Command::ShowDataDir(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("Error: {e}");
            }
            std::process::exit(e.exit_code());
        }
    }
}
