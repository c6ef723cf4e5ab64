//! SQL for the history store.
//!
//! Every moved file gets one `files` row and one `paths` row. All `paths`
//! rows written by one sort run share a `batch` number. Timestamps are unix
//! seconds.

/// Current schema version, stored in the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// The metadata key/value table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// One row per moved file.
pub const CREATE_FILES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        filename TEXT NOT NULL,
        filepath_hash TEXT NOT NULL,
        last_modified INTEGER NOT NULL,
        added_at INTEGER NOT NULL
    )";

/// One row per move; `accepted` drops to 0 once the move is undone.
pub const CREATE_PATHS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS paths (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        file_id INTEGER NOT NULL REFERENCES files(id),
        batch INTEGER NOT NULL,
        source TEXT NOT NULL,
        destination TEXT NOT NULL,
        accepted INTEGER NOT NULL DEFAULT 1,
        added_at INTEGER NOT NULL
    )";

/// Index for joining paths to files.
pub const CREATE_FILE_ID_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_paths_file_id ON paths(file_id)";

/// Index for selecting one run.
pub const CREATE_BATCH_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_paths_batch ON paths(batch)";

/// Select the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Insert or update the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Insert a file row.
pub const INSERT_FILE: &str = r"
    INSERT INTO files (filename, filepath_hash, last_modified, added_at)
    VALUES (?, ?, ?, ?)
";

/// Insert a path row.
pub const INSERT_PATH: &str = r"
    INSERT INTO paths (file_id, batch, source, destination, accepted, added_at)
    VALUES (?, ?, ?, ?, 1, ?)
";

/// Columns shared by every entry query, in `row_to_entry` order.
pub const SELECT_ENTRIES: &str = r"
    SELECT p.id, p.batch, f.filename, p.source, p.destination, p.accepted,
           p.added_at, f.last_modified
    FROM paths p
    JOIN files f ON f.id = p.file_id
";
