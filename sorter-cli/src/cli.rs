//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CategoriesCommand, CompletionsCommand, HistoryCommand, ShowDataDirCommand, SortCommand,
    UndoCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Organise folders into extension and category folders.
#[derive(Parser)]
#[command(name = "sorter")]
#[command(version, about = "Sort files into extension and category folders", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "SORTER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "SORTER_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Sort a folder into extension and category folders
    Sort(SortCommand),

    /// Show the most recent moves
    History(HistoryCommand),

    /// Move files back to where the latest run found them
    Undo(UndoCommand),

    /// List categories and their extensions
    Categories(CategoriesCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
