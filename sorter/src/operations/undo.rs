//! Reversing recorded moves.
//!
//! Undo works from the history log, newest move first. A move can be
//! reversed when its destination still exists and its source path is free;
//! nothing is ever overwritten. Reversed entries are flagged in the log so
//! they are not undone twice.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::history::{BatchId, HistoryEntry, HistoryLog};
use crate::relocate::move_file;

/// Options for an undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoOptions {
    /// Undo the newest `count` accepted moves instead of the latest run.
    pub count: Option<usize>,
    /// Preview without touching the filesystem or the log.
    pub dry_run: bool,
}

impl UndoOptions {
    /// Options that undo the latest run.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::operations::UndoOptions;
    ///
    /// let options = UndoOptions::new().with_count(Some(3)).with_dry_run(true);
    /// assert_eq!(options.count, Some(3));
    /// assert!(options.dry_run);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            count: None,
            dry_run: false,
        }
    }

    /// Sets the number of moves to undo.
    #[must_use]
    pub const fn with_count(mut self, count: Option<usize>) -> Self {
        self.count = count;
        self
    }

    /// Sets the `dry_run` flag.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A move that will not be reversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// The history entry.
    pub entry: HistoryEntry,
    /// Why it is skipped.
    pub reason: String,
}

/// The moves an undo would reverse.
#[derive(Debug, Clone)]
pub struct UndoPlan {
    /// The options the plan was built with.
    pub options: UndoOptions,
    /// The batch being undone, when undoing the latest run.
    pub batch: Option<BatchId>,
    /// Entries to reverse, newest first.
    pub restores: Vec<HistoryEntry>,
    /// Entries that cannot be reversed.
    pub skipped: Vec<SkippedEntry>,
}

impl UndoPlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new(options: UndoOptions) -> Self {
        Self {
            options,
            batch: None,
            restores: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Select the entries to undo and check each one against the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the history log cannot be read.
    pub fn build(&mut self, history: &dyn HistoryLog) -> Result<()> {
        let entries = match self.options.count {
            Some(count) => history.recent(count)?,
            None => match history.latest_batch()? {
                Some(batch) => {
                    self.batch = Some(batch);
                    history.batch_entries(batch)?
                }
                None => Vec::new(),
            },
        };
        log::debug!("undo candidates: {}", entries.len());

        let mut claimed: HashSet<PathBuf> = HashSet::new();
        for entry in entries {
            match check_reversible(&entry, &claimed) {
                Some(reason) => self.skipped.push(SkippedEntry { entry, reason }),
                None => {
                    claimed.insert(entry.source.clone());
                    self.restores.push(entry);
                }
            }
        }
        Ok(())
    }

    /// True if there is nothing to reverse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restores.is_empty()
    }
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn check_reversible(entry: &HistoryEntry, claimed: &HashSet<PathBuf>) -> Option<String> {
    if !exists(&entry.destination) {
        return Some(format!(
            "\"{}\" no longer exists",
            entry.destination.display()
        ));
    }
    if exists(&entry.source) || claimed.contains(&entry.source) {
        return Some(format!("\"{}\" is already taken", entry.source.display()));
    }
    None
}

/// What an undo did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoResult {
    /// True if nothing was changed.
    pub dry_run: bool,
    /// Moves reversed (or that would be), as `(from, to)` pairs.
    pub restored: Vec<(PathBuf, PathBuf)>,
    /// Entries not reversed, with reasons.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Carry out `plan`.
///
/// Each restored entry is flagged as reversed in `history` right after its
/// file is moved back. A move that fails at this point is reported as
/// skipped and the rest of the plan still runs.
///
/// # Errors
///
/// Returns an error if the history log cannot be written.
///
/// # Examples
///
/// ```
/// use sorter::history::{HistoryLog, MemoryHistory, MoveRecord};
/// use sorter::operations::{execute_undo, UndoOptions, UndoPlan};
///
/// let dir = tempfile::tempdir().unwrap();
/// let (from, to) = (dir.path().join("a.txt"), dir.path().join("b.txt"));
/// std::fs::write(&to, b"moved").unwrap();
///
/// let mut history = MemoryHistory::new();
/// history.append(&[MoveRecord::from_move(&from, &to)]).unwrap();
///
/// let mut plan = UndoPlan::new(UndoOptions::new());
/// plan.build(&history).unwrap();
/// let result = execute_undo(&plan, &mut history).unwrap();
///
/// assert_eq!(result.restored.len(), 1);
/// assert!(from.is_file());
/// ```
pub fn execute_undo(plan: &UndoPlan, history: &mut dyn HistoryLog) -> Result<UndoResult> {
    let mut result = UndoResult {
        dry_run: plan.options.dry_run,
        skipped: plan
            .skipped
            .iter()
            .map(|s| (s.entry.destination.clone(), s.reason.clone()))
            .collect(),
        ..UndoResult::default()
    };

    if plan.options.dry_run {
        result.restored = plan
            .restores
            .iter()
            .map(|e| (e.destination.clone(), e.source.clone()))
            .collect();
        return Ok(result);
    }

    for entry in &plan.restores {
        if let Err(reason) = restore(entry) {
            log::warn!("could not restore {}: {reason}", entry.source.display());
            result.skipped.push((entry.destination.clone(), reason));
            continue;
        }
        history.mark_reversed(&entry.source, &entry.destination, entry.added_at)?;
        log::debug!(
            "restored {} -> {}",
            entry.destination.display(),
            entry.source.display()
        );
        result
            .restored
            .push((entry.destination.clone(), entry.source.clone()));
    }
    Ok(result)
}

fn restore(entry: &HistoryEntry) -> std::result::Result<(), String> {
    if exists(&entry.source) {
        return Err(format!("\"{}\" is already taken", entry.source.display()));
    }
    if let Some(parent) = entry.source.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    move_file(&entry.destination, &entry.source).map_err(|e| e.to_string())
}
