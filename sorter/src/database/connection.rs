//! Database connection management.

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

use super::config::DatabaseConfig;

/// The SQLite history store.
///
/// # Examples
///
/// ```
/// use sorter::database::{Database, DatabaseConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let db = Database::open(DatabaseConfig::new(dir.path().join("sorter.db"))).unwrap();
/// assert!(dir.path().join("sorter.db").exists());
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Open (and if needed create) the database.
    ///
    /// Sets WAL journaling and the busy timeout, then initialises or checks
    /// the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be created, a
    /// PRAGMA fails, or the schema version is not supported.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;
        if !config.read_only {
            // journal_mode returns a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }

        super::migrations::check_schema_compatibility(&conn)?;
        log::debug!("opened history database {}", config.path.display());

        Ok(Self { conn, config })
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The underlying connection, mutably.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_sets_wal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");
        assert_eq!(db.config().path, path);
    }

    #[test]
    fn test_database_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("test.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        drop(Database::open(DatabaseConfig::new(&path)).unwrap());

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        assert!(db
            .connection()
            .execute("CREATE TABLE scratch (id INTEGER)", [])
            .is_err());
    }
}
