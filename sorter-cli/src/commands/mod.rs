//! CLI command implementations.
//!
//! - `sort`: Sort a folder
//! - `history`: Show the most recent moves
//! - `undo`: Reverse the latest run or the newest moves
//! - `categories`: Print the extension table
//! - `show_data_dir`: Show resolved data directory path
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod categories;
pub mod completions;
pub mod history;
pub mod show_data_dir;
pub mod sort;
pub mod undo;
pub mod validate;

pub use categories::CategoriesCommand;
pub use completions::CompletionsCommand;
pub use history::HistoryCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use sort::SortCommand;
pub use undo::UndoCommand;
pub use validate::ValidateCommand;
