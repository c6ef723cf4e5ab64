//! Schema initialisation and version checks.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BATCH_INDEX, CREATE_FILES_TABLE, CREATE_FILE_ID_INDEX, CREATE_METADATA_TABLE,
    CREATE_PATHS_TABLE, CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Create every table and index and record the schema version.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use sorter::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_FILES_TABLE, [])?;
    conn.execute(CREATE_PATHS_TABLE, [])?;
    conn.execute(CREATE_FILE_ID_INDEX, [])?;
    conn.execute(CREATE_BATCH_INDEX, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    Ok(())
}

/// The stored schema version, or 0 for an uninitialised database.
///
/// # Errors
///
/// Returns an error if the query fails for any reason other than a missing
/// table or row.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(ref err, Some(ref msg)))
            if err.code == rusqlite::ErrorCode::Unknown && msg.contains("no such table") =>
        {
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

/// Initialise a fresh database or verify an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version differs
/// from [`CURRENT_SCHEMA_VERSION`], or a database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;
    if version == 0 {
        return initialize_schema(conn);
    }
    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: version.unsigned_abs(),
        });
    }
    Ok(())
}
