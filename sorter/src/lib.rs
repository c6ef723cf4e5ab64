#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # sorter
//!
//! A library for organising folder trees by file extension and category.
//!
//! A sort run takes the files of a folder and moves each one into a bucket
//! folder chosen by its extension (`PDF/`), its category (`document/`), both
//! (`document/PDF/`), or a folder the caller names. Folders the engine
//! creates carry a small ownership marker so later runs recognise them;
//! folders carrying an ignore marker are never touched. Every move is
//! recorded in a history log so runs can be reported and undone.
//!
//! ## Core Types
//!
//! - [`SortEngine`] and [`SortOptions`]: one sort run
//! - [`Classifier`] and [`Category`]: extension classification
//! - [`FileRelocator`] and [`FolderRelocator`]: moving files and folders
//! - [`HistoryLog`], [`Database`] and [`MemoryHistory`]: the move history
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use sorter::{Category, Classifier};
//!
//! let classifier = Classifier::new();
//! assert_eq!(classifier.category_of("pdf"), Category::Document);
//! assert_eq!(classifier.category_of("PNG"), Category::Image);
//! assert_eq!(classifier.category_of("xyz123"), Category::Undefined);
//! ```

pub mod classify;
pub mod config;
pub mod database;
pub mod engine;
pub mod error;
pub mod history;
pub mod logging;
pub mod operations;
pub mod path;
pub mod relocate;

// Re-export key types at crate root for convenience
pub use classify::{Category, Classifier};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use engine::{
    NullSink, ProgressEvent, ProgressSink, RunState, Severity, SortEngine, SortOptions, SortReport,
};
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryLog, MemoryHistory, MoveRecord, RunMarker};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{execute_undo, UndoOptions, UndoPlan, UndoResult};
pub use path::{PathEntity, PathRelationship};
pub use relocate::{FileRelocator, FolderRelocator, GroupPolicy, Sentinels};
