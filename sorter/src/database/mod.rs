//! SQLite history store.
//!
//! [`Database`] implements [`HistoryLog`](crate::history::HistoryLog) on top
//! of a single SQLite file, by default `~/.sorter/sorter.db`. Each sort run
//! is written in one immediate transaction, so readers see either all of a
//! run's moves or none of them.
//!
//! # Examples
//!
//! ```
//! use sorter::database::{Database, DatabaseConfig};
//! use sorter::history::{HistoryLog, MoveRecord};
//! use std::path::Path;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut db = Database::open(DatabaseConfig::new(dir.path().join("sorter.db"))).unwrap();
//!
//! let marker = db.start_marker().unwrap();
//! db.append(&[MoveRecord::from_move(Path::new("/in/a.pdf"), Path::new("/in/PDF/a.pdf"))])
//!     .unwrap();
//! assert_eq!(db.query(marker).unwrap().len(), 1);
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
