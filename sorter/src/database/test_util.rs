//! Shared helpers for database unit tests.

use std::path::Path;
use std::time::SystemTime;

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::history::{path_hash, MoveRecord};

/// Opens a database in a temporary directory that lives for the whole test
/// process.
///
/// # Panics
///
/// Panics if the directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let db = Database::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap();
    std::mem::forget(dir);
    db
}

/// A record for moving `/in/<name>` to `/out/<name>`.
#[must_use]
pub fn create_test_record(name: &str) -> MoveRecord {
    let source = Path::new("/in").join(name);
    MoveRecord {
        filename: name.to_string(),
        path_hash: path_hash(&source),
        last_modified: SystemTime::now(),
        destination: Path::new("/out").join(name),
        source,
    }
}
