//! [`HistoryLog`] implementation for the SQLite store.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use rusqlite::{params, TransactionBehavior};

use crate::error::Result;
use crate::history::{BatchId, HistoryEntry, HistoryLog, MoveRecord, RunMarker};

use super::connection::Database;
use super::schema::{INSERT_FILE, INSERT_PATH, SELECT_ENTRIES};

/// Converts a `SystemTime` to Unix epoch seconds for storage.
///
/// Times before the epoch become negative, truncated toward zero.
pub(super) fn systemtime_to_unix_secs(time: SystemTime) -> i64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(e) => i64::try_from(e.duration().as_secs()).map_or(i64::MIN, |secs| -secs),
    }
}

/// Converts stored Unix epoch seconds to a `SystemTime`.
pub(super) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    let offset = Duration::from_secs(secs.unsigned_abs());
    let time = if secs < 0 {
        SystemTime::UNIX_EPOCH.checked_sub(offset)
    } else {
        SystemTime::UNIX_EPOCH.checked_add(offset)
    };
    time.unwrap_or(SystemTime::UNIX_EPOCH)
}

/// Reads one row selected with [`SELECT_ENTRIES`].
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let source: String = row.get(3)?;
    let destination: String = row.get(4)?;
    Ok(HistoryEntry {
        id: row.get(0)?,
        batch: row.get(1)?,
        filename: row.get(2)?,
        source: PathBuf::from(source),
        destination: PathBuf::from(destination),
        accepted: row.get(5)?,
        added_at: unix_secs_to_systemtime(row.get(6)?),
        last_modified: unix_secs_to_systemtime(row.get(7)?),
    })
}

const SELECT_MAX_PATH_ID: &str = "SELECT COALESCE(MAX(id), 0) FROM paths";
const SELECT_NEXT_BATCH: &str = "SELECT COALESCE(MAX(batch), 0) + 1 FROM paths";
const SELECT_LATEST_BATCH: &str = "SELECT MAX(batch) FROM paths WHERE accepted = 1";
const UPDATE_REVERSED: &str = r"
    UPDATE paths SET accepted = 0
    WHERE source = ? AND destination = ? AND added_at = ? AND accepted = 1
";

impl Database {
    fn select_entries(
        &self,
        filter: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<HistoryEntry>> {
        let sql = format!("{SELECT_ENTRIES} {filter}");
        let mut stmt = self.conn.prepare(&sql)?;
        let entries = stmt
            .query_map(params, row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Number of moves ever recorded, reversed ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn entry_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM paths", [], |row| row.get(0))?;
        Ok(count.unsigned_abs())
    }
}

impl HistoryLog for Database {
    fn start_marker(&self) -> Result<RunMarker> {
        let max: i64 = self.conn.query_row(SELECT_MAX_PATH_ID, [], |row| row.get(0))?;
        Ok(RunMarker::from_raw(max))
    }

    fn append(&mut self, batch: &[MoveRecord]) -> Result<Option<BatchId>> {
        if batch.is_empty() {
            return Ok(None);
        }
        let now = systemtime_to_unix_secs(SystemTime::now());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let batch_id: BatchId = tx.query_row(SELECT_NEXT_BATCH, [], |row| row.get(0))?;
        {
            let mut insert_file = tx.prepare(INSERT_FILE)?;
            let mut insert_path = tx.prepare(INSERT_PATH)?;
            for record in batch {
                let last_modified = systemtime_to_unix_secs(record.last_modified);
                insert_file.execute(params![
                    record.filename,
                    record.path_hash,
                    last_modified,
                    now
                ])?;
                let file_id = tx.last_insert_rowid();
                insert_path.execute(params![
                    file_id,
                    batch_id,
                    record.source.to_string_lossy(),
                    record.destination.to_string_lossy(),
                    now
                ])?;
            }
        }
        tx.commit()?;

        log::debug!("recorded {} moves as batch {batch_id}", batch.len());
        Ok(Some(batch_id))
    }

    fn query(&self, since: RunMarker) -> Result<Vec<HistoryEntry>> {
        self.select_entries("WHERE p.id > ? ORDER BY p.id ASC", [since.raw()])
    }

    fn recent(&self, count: usize) -> Result<Vec<HistoryEntry>> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        self.select_entries(
            "WHERE p.accepted = 1 ORDER BY p.id DESC LIMIT ?",
            [limit],
        )
    }

    fn latest_batch(&self) -> Result<Option<BatchId>> {
        let batch: Option<BatchId> = self
            .conn
            .query_row(SELECT_LATEST_BATCH, [], |row| row.get(0))?;
        Ok(batch)
    }

    fn batch_entries(&self, batch: BatchId) -> Result<Vec<HistoryEntry>> {
        self.select_entries(
            "WHERE p.batch = ? AND p.accepted = 1 ORDER BY p.id DESC",
            [batch],
        )
    }

    fn mark_reversed(
        &mut self,
        source: &Path,
        destination: &Path,
        timestamp: SystemTime,
    ) -> Result<usize> {
        let secs = systemtime_to_unix_secs(timestamp);
        let changed = self.conn.execute(
            UPDATE_REVERSED,
            params![
                source.to_string_lossy(),
                destination.to_string_lossy(),
                secs
            ],
        )?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, create_test_record};

    #[test]
    fn test_empty_database() {
        let db = create_test_database();
        assert_eq!(db.start_marker().unwrap(), RunMarker::from_raw(0));
        assert!(db.query(RunMarker::default()).unwrap().is_empty());
        assert_eq!(db.latest_batch().unwrap(), None);
        assert!(db.recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_query_since_marker() {
        let mut db = create_test_database();
        db.append(&[create_test_record("old.txt")]).unwrap();

        let marker = db.start_marker().unwrap();
        let batch = db
            .append(&[create_test_record("a.pdf"), create_test_record("b.png")])
            .unwrap();
        assert_eq!(batch, Some(2));

        let entries = db.query(marker).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, ["a.pdf", "b.png"]);
        assert!(entries.iter().all(|e| e.accepted && e.batch == 2));
        assert_eq!(entries[0].source, PathBuf::from("/in/a.pdf"));
        assert_eq!(entries[0].destination, PathBuf::from("/out/a.pdf"));
        assert_eq!(db.entry_count().unwrap(), 3);
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let mut db = create_test_database();
        assert_eq!(db.append(&[]).unwrap(), None);
        assert_eq!(db.entry_count().unwrap(), 0);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut db = create_test_database();
        db.append(&[create_test_record("a"), create_test_record("b")])
            .unwrap();
        db.append(&[create_test_record("c")]).unwrap();

        let names: Vec<_> = db
            .recent(2)
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();
        assert_eq!(names, ["c", "b"]);
    }

    #[test]
    fn test_mark_reversed_hides_entry() {
        let mut db = create_test_database();
        db.append(&[create_test_record("a")]).unwrap();
        let batch = db.append(&[create_test_record("b")]).unwrap().unwrap();

        let entry = db.batch_entries(batch).unwrap().remove(0);
        let changed = db
            .mark_reversed(&entry.source, &entry.destination, entry.added_at)
            .unwrap();
        assert_eq!(changed, 1);

        assert!(db.batch_entries(batch).unwrap().is_empty());
        assert_eq!(db.latest_batch().unwrap(), Some(batch - 1));
        let all = db.query(RunMarker::default()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[1].accepted);
    }

    #[test]
    fn test_mark_reversed_requires_matching_timestamp() {
        let mut db = create_test_database();
        db.append(&[create_test_record("a")]).unwrap();
        let changed = db
            .mark_reversed(
                Path::new("/in/a"),
                Path::new("/out/a"),
                SystemTime::UNIX_EPOCH,
            )
            .unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn test_timestamp_conversion_roundtrip() {
        let now = SystemTime::now();
        let secs = systemtime_to_unix_secs(now);
        let back = unix_secs_to_systemtime(secs);
        assert!(now.duration_since(back).unwrap() < Duration::from_secs(1));
    }

    #[test]
    fn test_timestamp_before_epoch_roundtrip() {
        let day = Duration::from_secs(86_400);
        let old = SystemTime::UNIX_EPOCH - day;
        assert_eq!(systemtime_to_unix_secs(old), -86_400);
        assert_eq!(unix_secs_to_systemtime(-86_400), old);
        assert_eq!(systemtime_to_unix_secs(SystemTime::UNIX_EPOCH), 0);
    }

    #[test]
    fn test_append_keeps_pre_epoch_modification_time() {
        let mut db = create_test_database();
        let mut record = create_test_record("old");
        record.last_modified = SystemTime::UNIX_EPOCH - Duration::from_secs(86_400);

        let batch = db.append(&[record.clone()]).unwrap();
        assert_eq!(batch, Some(1));

        let entries = db.query(RunMarker::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].last_modified, record.last_modified);
    }
}
