//! The sort engine.
//!
//! One call to [`SortEngine::run`] is one sort run. The engine moves
//! through four states:
//!
//! - `ValidatingPaths` checks the source and destination folders and the
//!   group folder name. A failure here ends the run before anything on disk
//!   changes.
//! - `Running` relocates matching files (and, when a search string or group
//!   folder name is given, matching top-level folders). Per-item failures
//!   become warnings.
//! - `Reporting` appends the run's moves to the history log as one batch and
//!   reads back everything after the run's start marker.
//! - `Idle` before and after a run.
//!
//! # Examples
//!
//! ```
//! use sorter::engine::{NullSink, SortEngine, SortOptions};
//! use sorter::history::MemoryHistory;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("report.pdf"), b"%PDF").unwrap();
//!
//! let mut history = MemoryHistory::new();
//! let mut sink = NullSink;
//! let report = SortEngine::new(&mut history, &mut sink)
//!     .run(&SortOptions::new(dir.path()))
//!     .unwrap();
//!
//! assert_eq!(report.moved, 1);
//! assert!(dir.path().join("PDF/report.pdf").is_file());
//! ```

pub mod pattern;
pub mod progress;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::classify::Category;
use crate::error::{Error, Result};
use crate::history::{BatchId, HistoryEntry, HistoryLog, MoveRecord};
use crate::path::{is_hidden_name, PathEntity, PathRelationship};
use crate::relocate::{FileRelocator, FolderRelocation, FolderRelocator, GroupPolicy, Relocation};

pub use pattern::FileMatcher;
pub use progress::{CollectingSink, NullSink, ProgressEvent, ProgressSink, Severity};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// No run in progress.
    #[default]
    Idle,
    /// Checking the run's folders.
    ValidatingPaths,
    /// Moving files and folders.
    Running,
    /// Writing and reading back the history log.
    Reporting,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ValidatingPaths => write!(f, "validating paths"),
            Self::Running => write!(f, "running"),
            Self::Reporting => write!(f, "reporting"),
        }
    }
}

/// Inputs to one sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    /// Folder to sort. Must be absolute.
    pub source: PathBuf,

    /// Folder to sort into. Defaults to `source`.
    pub destination: Option<PathBuf>,

    /// Also sort the files of every subfolder, removing folders left empty.
    pub recursive: bool,

    /// Group into category (or named) folders.
    pub group: bool,

    /// Add an extension level below the group folder.
    pub by_extension: bool,

    /// Explicit group folder.
    pub group_folder_name: Option<String>,

    /// Only sort entries whose names contain these words, in any case.
    pub search: Option<String>,

    /// File extensions to sort; `*` means all.
    pub file_types: Vec<String>,
}

impl SortOptions {
    /// Options that sort every file of `source` into extension folders in
    /// place.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: None,
            recursive: false,
            group: false,
            by_extension: false,
            group_folder_name: None,
            search: None,
            file_types: vec!["*".to_string()],
        }
    }

    /// Sets the destination folder.
    #[must_use]
    pub fn with_destination(mut self, destination: Option<PathBuf>) -> Self {
        self.destination = destination;
        self
    }

    /// Sets the recursive flag.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the group flag.
    #[must_use]
    pub const fn with_group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }

    /// Sets the by-extension flag.
    #[must_use]
    pub const fn with_by_extension(mut self, by_extension: bool) -> Self {
        self.by_extension = by_extension;
        self
    }

    /// Sets the explicit group folder name.
    #[must_use]
    pub fn with_group_folder_name(mut self, name: Option<String>) -> Self {
        self.group_folder_name = name;
        self
    }

    /// Sets the search string.
    #[must_use]
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    /// Sets the file-type filters.
    #[must_use]
    pub fn with_file_types(mut self, file_types: Vec<String>) -> Self {
        self.file_types = file_types;
        self
    }

    /// The folder files are sorted into.
    #[must_use]
    pub fn destination(&self) -> &Path {
        self.destination.as_deref().unwrap_or(&self.source)
    }

    /// The group folder files and folders are collected in: the explicit
    /// name, or else the trimmed search text.
    #[must_use]
    pub fn effective_group_folder_name(&self) -> Option<String> {
        self.group_folder_name
            .clone()
            .or_else(|| self.search_text().map(|s| s.trim().to_string()))
    }

    /// The grouping policy these options describe.
    #[must_use]
    pub fn policy(&self) -> GroupPolicy {
        GroupPolicy::new()
            .with_group(self.group)
            .with_by_extension(self.by_extension)
            .with_group_folder_name(self.effective_group_folder_name())
    }

    fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn sorts_folders(&self) -> bool {
        self.search_text().is_some() || self.group_folder_name.is_some()
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortReport {
    /// History entries appended by this run, oldest first.
    pub entries: Vec<HistoryEntry>,
    /// The batch the run was recorded under, if anything moved.
    pub batch: Option<BatchId>,
    /// Per-item problems, in the order they occurred.
    pub warnings: Vec<String>,
    /// Files moved, including those moved by folder merges.
    pub moved: usize,
    /// Files already in place.
    pub unchanged: usize,
    /// Files that could not be moved.
    pub blocked: usize,
    /// Folders merged into the destination.
    pub folders_merged: usize,
    /// Empty subfolders removed by a recursive run.
    pub folders_removed: usize,
}

/// Folders and matchers fixed by validation.
struct RunPlan {
    source: PathBuf,
    destination: PathBuf,
    policy: GroupPolicy,
    files: FileMatcher,
    folders: Option<FileMatcher>,
}

/// Mutable state of the run in progress.
#[derive(Default)]
struct Tally {
    batch: Vec<MoveRecord>,
    report: SortReport,
    percent: u8,
}

/// Drives sort runs against a history log and a progress sink.
pub struct SortEngine<'a> {
    history: &'a mut dyn HistoryLog,
    sink: &'a mut dyn ProgressSink,
    files: FileRelocator,
    folders: FolderRelocator,
    state: RunState,
}

impl fmt::Debug for SortEngine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortEngine")
            .field("files", &self.files)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> SortEngine<'a> {
    /// Creates an engine with the default classifier and marker names.
    pub fn new(history: &'a mut dyn HistoryLog, sink: &'a mut dyn ProgressSink) -> Self {
        Self::with_relocator(history, sink, FileRelocator::default())
    }

    /// Creates an engine around a configured file relocator.
    pub fn with_relocator(
        history: &'a mut dyn HistoryLog,
        sink: &'a mut dyn ProgressSink,
        files: FileRelocator,
    ) -> Self {
        Self {
            history,
            sink,
            folders: FolderRelocator::new(files.clone()),
            files,
            state: RunState::Idle,
        }
    }

    /// The current state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Perform one sort run.
    ///
    /// # Errors
    ///
    /// Returns an error, after reporting it once through the progress sink,
    /// if validation fails or the history log cannot be read or written.
    /// Problems with individual files and folders never end the run; they
    /// are listed in [`SortReport::warnings`].
    pub fn run(&mut self, options: &SortOptions) -> Result<SortReport> {
        let result = self.run_inner(options);
        if let Err(e) = &result {
            self.sink
                .report(&ProgressEvent::new(e.to_string(), Severity::Error, 0));
        }
        self.transition(RunState::Idle);
        result
    }

    fn run_inner(&mut self, options: &SortOptions) -> Result<SortReport> {
        self.transition(RunState::ValidatingPaths);
        let plan = Self::validate(options)?;
        let marker = self.history.start_marker()?;

        self.transition(RunState::Running);
        let mut tally = Tally::default();
        self.progress(
            &mut tally,
            0,
            &format!("Sorting {}", plan.source.display()),
        );
        log::debug!("file patterns: {:?}", plan.files.patterns());
        self.progress(&mut tally, 10, "Matching files");

        self.sort_files(&plan.source, &plan, &mut tally);
        self.progress(&mut tally, 25, "Sorted top-level files");

        if options.recursive {
            self.walk(&plan, &mut tally);
        }
        self.progress(&mut tally, 50, "Sorted subfolders");

        if let Some(matcher) = &plan.folders {
            self.sort_folders(matcher, &plan, &mut tally);
        }
        self.progress(&mut tally, 75, "Recording history");

        self.transition(RunState::Reporting);
        let batch = self.history.append(&tally.batch)?;
        let entries = self.history.query(marker)?;

        let mut report = std::mem::take(&mut tally.report);
        report.batch = batch;
        report.entries = entries;
        self.progress(
            &mut tally,
            100,
            &format!("Done: {} moved, {} warnings", report.moved, report.warnings.len()),
        );
        Ok(report)
    }

    fn transition(&mut self, next: RunState) {
        if self.state != next {
            log::debug!("sort engine: {} -> {next}", self.state);
            self.state = next;
        }
    }

    fn validate(options: &SortOptions) -> Result<RunPlan> {
        let policy = options.policy();
        policy.validate()?;
        let source = options.source.clone();
        let destination = options.destination().to_path_buf();
        validate_directory(&source)?;
        if destination != source {
            validate_directory(&destination)?;
        }

        let files = FileMatcher::files(options.search_text(), &options.file_types)?;
        let folders = if options.sorts_folders() {
            Some(FileMatcher::folders(options.search_text())?)
        } else {
            None
        };
        Ok(RunPlan {
            source,
            destination,
            policy,
            files,
            folders,
        })
    }

    fn progress(&mut self, tally: &mut Tally, percent: u8, message: &str) {
        tally.percent = tally.percent.max(percent);
        self.sink
            .report(&ProgressEvent::new(message, Severity::Info, tally.percent));
    }

    fn warn(&mut self, tally: &mut Tally, message: String) {
        self.sink
            .report(&ProgressEvent::new(&message, Severity::Warning, tally.percent));
        tally.report.warnings.push(message);
    }

    /// Relocate the matching files directly inside `dir`.
    fn sort_files(&mut self, dir: &Path, plan: &RunPlan, tally: &mut Tally) {
        let sentinels = self.files.sentinels();
        if sentinels.has_ignore_marker(dir) {
            log::debug!("skipping ignored folder {}", dir.display());
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.warn(tally, format!("Could not read \"{}\": {e}", dir.display()));
                return;
            }
        };
        let files: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                !name.starts_with('.')
                    && !sentinels.is_marker_name(&name)
                    && plan.files.is_match(&name)
            })
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();

        for path in files {
            let mut file = match PathEntity::new(&path) {
                Ok(file) => file,
                Err(e) => {
                    self.warn(tally, e.to_string());
                    continue;
                }
            };
            match self.files.relocate(&mut file, &plan.destination, &plan.policy) {
                Ok(Relocation::Moved { from, to }) => {
                    tally.batch.push(MoveRecord::from_move(&from, &to));
                    tally.report.moved += 1;
                }
                Ok(Relocation::Unchanged) => tally.report.unchanged += 1,
                Ok(blocked @ Relocation::Blocked { .. }) => {
                    tally.report.blocked += 1;
                    if let Some(warning) = blocked.warning() {
                        self.warn(tally, warning);
                    }
                }
                Err(e) => {
                    tally.report.blocked += 1;
                    self.warn(tally, format!("Could not move \"{}\": {e}", path.display()));
                }
            }
        }
    }

    /// Sort the files of every subfolder of the source, parents before
    /// children, then remove the folders left empty, children first.
    fn walk(&mut self, plan: &RunPlan, tally: &mut Tally) {
        if self.files.sentinels().has_ignore_marker(&plan.source) {
            return;
        }
        let (folders, warnings) = self.subfolders(plan);
        for warning in warnings {
            self.warn(tally, warning);
        }
        for dir in &folders {
            self.sort_files(dir, plan, tally);
        }
        for dir in folders.iter().rev() {
            if !is_empty_dir(dir) {
                continue;
            }
            match fs::remove_dir(dir) {
                Ok(()) => {
                    log::debug!("removed empty folder {}", dir.display());
                    tally.report.folders_removed += 1;
                }
                Err(e) => {
                    log::warn!("could not remove {}: {e}", dir.display());
                }
            }
        }
    }

    /// Snapshot of the subfolders a recursive run visits, in walk order.
    ///
    /// Hidden and ignore-marked folders are pruned with everything below
    /// them, as are `<destination>/FOLDERS` and a destination nested in the
    /// source.
    fn subfolders(&self, plan: &RunPlan) -> (Vec<PathBuf>, Vec<String>) {
        let sentinels = self.files.sentinels();
        let merged = plan.destination.join(Category::Folders.label());
        let separate = plan.destination != plan.source;

        let mut folders = Vec::new();
        let mut warnings = Vec::new();
        let walker = WalkDir::new(&plan.source)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                let path = entry.path();
                entry.file_type().is_dir()
                    && !is_hidden_name(&entry.file_name().to_string_lossy())
                    && !sentinels.has_ignore_marker(path)
                    && path != merged.as_path()
                    && !(separate && PathRelationship::is_within(path, &plan.destination))
            });
        for entry in walker {
            match entry {
                Ok(entry) => folders.push(entry.into_path()),
                Err(e) => {
                    let path = e.path().unwrap_or(plan.source.as_path()).to_path_buf();
                    warnings.push(format!("Could not read \"{}\": {e}", path.display()));
                }
            }
        }
        (folders, warnings)
    }

    /// Relocate the matching top-level folders of the source.
    fn sort_folders(&mut self, matcher: &FileMatcher, plan: &RunPlan, tally: &mut Tally) {
        let entries = match fs::read_dir(&plan.source) {
            Ok(entries) => entries,
            Err(e) => {
                let message = format!("Could not read \"{}\": {e}", plan.source.display());
                self.warn(tally, message);
                return;
            }
        };
        let sentinels = self.files.sentinels();
        let candidates: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                !is_hidden_name(&name) && matcher.is_match(&name)
            })
            .map(|e| e.path())
            .filter(|p| !sentinels.has_ignore_marker(p) && !sentinels.is_owned(p))
            .filter(|p| !PathRelationship::is_within(&plan.destination, p))
            .collect();

        for path in candidates {
            let mut folder = match PathEntity::new(&path) {
                Ok(folder) => folder,
                Err(e) => {
                    self.warn(tally, e.to_string());
                    continue;
                }
            };
            match self
                .folders
                .relocate(&mut folder, &plan.destination, &plan.policy)
            {
                Ok(FolderRelocation::Merged(merge)) => {
                    tally.report.folders_merged += 1;
                    tally.report.moved += merge.moved.len();
                    for (from, to) in &merge.moved {
                        tally.batch.push(MoveRecord::from_move(from, to));
                    }
                    for conflict in merge.conflicts {
                        self.warn(
                            tally,
                            format!(
                                "Kept \"{}\" in place: a file with that name already exists in \"{}\"",
                                conflict.display(),
                                merge.destination.display()
                            ),
                        );
                    }
                    for warning in merge.warnings {
                        self.warn(tally, warning);
                    }
                }
                Ok(FolderRelocation::Grouped(group)) => {
                    for relocation in group.relocations {
                        match relocation {
                            Relocation::Moved { from, to } => {
                                tally.batch.push(MoveRecord::from_move(&from, &to));
                                tally.report.moved += 1;
                            }
                            Relocation::Unchanged => tally.report.unchanged += 1,
                            blocked @ Relocation::Blocked { .. } => {
                                tally.report.blocked += 1;
                                if let Some(warning) = blocked.warning() {
                                    self.warn(tally, warning);
                                }
                            }
                        }
                    }
                }
                Ok(FolderRelocation::Blocked { path, reason }) => {
                    self.warn(
                        tally,
                        format!("Could not move \"{}\": {reason}", path.display()),
                    );
                }
                Ok(FolderRelocation::Ignored | FolderRelocation::Unchanged) => {}
                Err(e) => {
                    self.warn(tally, format!("Could not move \"{}\": {e}", path.display()));
                }
            }
        }
    }
}

/// Check that `dir` is an absolute, existing, writable folder.
///
/// Writability is probed by creating and removing a scratch subfolder.
fn validate_directory(dir: &Path) -> Result<()> {
    if !dir.is_absolute() {
        return Err(Error::RelativePath {
            path: dir.to_path_buf(),
        });
    }
    if !dir.exists() {
        return Err(Error::PathNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let probe = dir.join(format!(".sorter-probe-{}", std::process::id()));
    if fs::create_dir(&probe).is_err() {
        return Err(Error::NotWritable {
            path: dir.to_path_buf(),
        });
    }
    if let Err(e) = fs::remove_dir(&probe) {
        log::warn!("could not remove {}: {e}", probe.display());
    }
    Ok(())
}

fn is_empty_dir(dir: &Path) -> bool {
    fs::read_dir(dir).is_ok_and(|mut entries| entries.next().is_none())
}
