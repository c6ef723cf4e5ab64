//! The history log consumed by the sort engine.
//!
//! The engine never talks to storage directly. At the start of a run it asks
//! the log for a [`RunMarker`]; at the end it appends the run's batch of
//! [`MoveRecord`]s in one go and reads back everything after the marker.
//! [`Database`](crate::Database) is the persistent implementation,
//! [`MemoryHistory`] a throwaway one.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Identifies the batch a run's moves were appended under.
pub type BatchId = i64;

/// A high-water mark into the log.
///
/// Entries appended after the marker was taken compare greater than it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RunMarker(i64);

impl RunMarker {
    /// Wrap a raw log position.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw log position.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }
}

/// One successful file move, as produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// File name at the source.
    pub filename: String,
    /// Hex digest of the original absolute path.
    pub path_hash: String,
    /// Modification time of the moved file.
    pub last_modified: SystemTime,
    /// Where the file was.
    pub source: PathBuf,
    /// Where the file is now.
    pub destination: PathBuf,
}

impl MoveRecord {
    /// Build a record for a move that has just happened.
    ///
    /// The modification time is read from `destination`, falling back to now
    /// if the file cannot be inspected.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::history::MoveRecord;
    /// use std::path::Path;
    ///
    /// let record = MoveRecord::from_move(Path::new("/in/a.txt"), Path::new("/out/TXT/a.txt"));
    /// assert_eq!(record.filename, "a.txt");
    /// assert_eq!(record.path_hash.len(), 64);
    /// ```
    #[must_use]
    pub fn from_move(source: &Path, destination: &Path) -> Self {
        let last_modified = destination
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or_else(|_| SystemTime::now());
        Self {
            filename: source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path_hash: path_hash(source),
            last_modified,
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        }
    }
}

/// A move as stored in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Log position.
    pub id: i64,
    /// The batch (run) the entry belongs to.
    pub batch: BatchId,
    /// File name at the source.
    pub filename: String,
    /// Where the file was.
    pub source: PathBuf,
    /// Where the file went.
    pub destination: PathBuf,
    /// False once the move has been reversed.
    pub accepted: bool,
    /// When the entry was appended, to the second.
    pub added_at: SystemTime,
    /// Modification time of the file when it was moved.
    pub last_modified: SystemTime,
}

/// Append-only store of the moves made by sort runs.
pub trait HistoryLog {
    /// The current high-water mark.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn start_marker(&self) -> Result<RunMarker>;

    /// Append one run's moves atomically.
    ///
    /// Returns the new batch id, or `None` for an empty batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written; nothing is appended
    /// in that case.
    fn append(&mut self, batch: &[MoveRecord]) -> Result<Option<BatchId>>;

    /// Every entry appended after `since`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn query(&self, since: RunMarker) -> Result<Vec<HistoryEntry>>;

    /// The newest `count` accepted entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn recent(&self, count: usize) -> Result<Vec<HistoryEntry>>;

    /// The most recent batch holding at least one accepted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn latest_batch(&self) -> Result<Option<BatchId>>;

    /// The accepted entries of `batch`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn batch_entries(&self, batch: BatchId) -> Result<Vec<HistoryEntry>>;

    /// Flag the entry matching all three fields as reversed.
    ///
    /// Returns the number of entries changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn mark_reversed(
        &mut self,
        source: &Path,
        destination: &Path,
        timestamp: SystemTime,
    ) -> Result<usize>;
}

/// An in-memory [`HistoryLog`].
///
/// # Examples
///
/// ```
/// use sorter::history::{HistoryLog, MemoryHistory, MoveRecord};
/// use std::path::Path;
///
/// let mut log = MemoryHistory::new();
/// let marker = log.start_marker().unwrap();
/// log.append(&[MoveRecord::from_move(Path::new("/a/x.txt"), Path::new("/a/TXT/x.txt"))])
///     .unwrap();
///
/// let entries = log.query(marker).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].filename, "x.txt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
    last_batch: BatchId,
}

impl MemoryHistory {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl HistoryLog for MemoryHistory {
    fn start_marker(&self) -> Result<RunMarker> {
        Ok(RunMarker(self.entries.last().map_or(0, |e| e.id)))
    }

    fn append(&mut self, batch: &[MoveRecord]) -> Result<Option<BatchId>> {
        if batch.is_empty() {
            return Ok(None);
        }
        self.last_batch += 1;
        let added_at = truncate_to_secs(SystemTime::now());
        let mut next_id = self.entries.last().map_or(0, |e| e.id);
        for record in batch {
            next_id += 1;
            self.entries.push(HistoryEntry {
                id: next_id,
                batch: self.last_batch,
                filename: record.filename.clone(),
                source: record.source.clone(),
                destination: record.destination.clone(),
                accepted: true,
                added_at,
                last_modified: truncate_to_secs(record.last_modified),
            });
        }
        Ok(Some(self.last_batch))
    }

    fn query(&self, since: RunMarker) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.id > since.0)
            .cloned()
            .collect())
    }

    fn recent(&self, count: usize) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .entries
            .iter()
            .rev()
            .filter(|e| e.accepted)
            .take(count)
            .cloned()
            .collect())
    }

    fn latest_batch(&self) -> Result<Option<BatchId>> {
        Ok(self
            .entries
            .iter()
            .rev()
            .find(|e| e.accepted)
            .map(|e| e.batch))
    }

    fn batch_entries(&self, batch: BatchId) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .entries
            .iter()
            .rev()
            .filter(|e| e.batch == batch && e.accepted)
            .cloned()
            .collect())
    }

    fn mark_reversed(
        &mut self,
        source: &Path,
        destination: &Path,
        timestamp: SystemTime,
    ) -> Result<usize> {
        let timestamp = truncate_to_secs(timestamp);
        let mut changed = 0;
        for entry in &mut self.entries {
            if entry.accepted
                && entry.source == source
                && entry.destination == destination
                && entry.added_at == timestamp
            {
                entry.accepted = false;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

/// Hex blake3 digest of an absolute path.
#[must_use]
pub fn path_hash(path: &Path) -> String {
    blake3::hash(path.to_string_lossy().as_bytes())
        .to_hex()
        .to_string()
}

fn truncate_to_secs(time: SystemTime) -> SystemTime {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => UNIX_EPOCH + Duration::from_secs(after.as_secs()),
        Err(e) => UNIX_EPOCH - Duration::from_secs(e.duration().as_secs()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> MoveRecord {
        MoveRecord::from_move(
            &Path::new("/in").join(name),
            &Path::new("/out").join(name),
        )
    }

    #[test]
    fn test_path_hash_is_stable() {
        let a = path_hash(Path::new("/in/a.txt"));
        assert_eq!(a, path_hash(Path::new("/in/a.txt")));
        assert_ne!(a, path_hash(Path::new("/in/b.txt")));
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_from_move_missing_destination_uses_now() {
        let before = SystemTime::now();
        let rec = record("a.txt");
        assert!(rec.last_modified >= before);
        assert_eq!(rec.source, Path::new("/in/a.txt"));
    }

    #[test]
    fn test_marker_selects_only_new_entries() {
        let mut log = MemoryHistory::new();
        log.append(&[record("old.txt")]).unwrap();

        let marker = log.start_marker().unwrap();
        assert_eq!(marker.raw(), 1);
        log.append(&[record("a.txt"), record("b.txt")]).unwrap();

        let names: Vec<_> = log
            .query(marker)
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn test_empty_batch_is_not_stored() {
        let mut log = MemoryHistory::new();
        assert_eq!(log.append(&[]).unwrap(), None);
        assert_eq!(log.latest_batch().unwrap(), None);
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_recent_and_batches() {
        let mut log = MemoryHistory::new();
        let first = log.append(&[record("a.txt")]).unwrap().unwrap();
        let second = log
            .append(&[record("b.txt"), record("c.txt")])
            .unwrap()
            .unwrap();
        assert_ne!(first, second);

        let recent: Vec<_> = log.recent(2).unwrap().into_iter().map(|e| e.filename).collect();
        assert_eq!(recent, ["c.txt", "b.txt"]);
        assert_eq!(log.latest_batch().unwrap(), Some(second));
        assert_eq!(log.batch_entries(first).unwrap().len(), 1);
    }

    #[test]
    fn test_mark_reversed() {
        let mut log = MemoryHistory::new();
        log.append(&[record("a.txt")]).unwrap();
        let entry = log.entries()[0].clone();

        let changed = log
            .mark_reversed(&entry.source, &entry.destination, entry.added_at)
            .unwrap();
        assert_eq!(changed, 1);
        assert!(log.recent(10).unwrap().is_empty());
        assert_eq!(log.latest_batch().unwrap(), None);

        let again = log
            .mark_reversed(&entry.source, &entry.destination, entry.added_at)
            .unwrap();
        assert_eq!(again, 0);
    }
}
