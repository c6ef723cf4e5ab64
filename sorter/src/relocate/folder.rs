//! Whole-folder relocation and in-place grouping.
//!
//! Folders are merged, never overwritten. The source tree is snapshotted
//! before any of its entries move, then every file is moved on its own into
//! the matching destination folder, so existing destination subfolders are
//! merged at the file level. When both sides hold a file of the same name
//! the destination copy wins and the incoming file stays behind in the
//! source folder, which is then left in place.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{move_file, FileRelocator, GroupPolicy, Relocation};
use crate::classify::Category;
use crate::error::{Error, Result};
use crate::path::{PathEntity, PathRelationship};

/// The outcome of relocating one folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderRelocation {
    /// The folder carries the ignore marker.
    Ignored,
    /// The folder already sits at its destination.
    Unchanged,
    /// The folder was the destination root and its files were grouped.
    Grouped(GroupReport),
    /// The folder was merged into its destination.
    Merged(MergeReport),
    /// The destination lies inside the folder itself.
    Blocked {
        /// The folder that was not moved.
        path: PathBuf,
        /// Why.
        reason: String,
    },
}

/// What a folder merge did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// The folder's new location.
    pub destination: PathBuf,
    /// Files moved, as `(from, to)` pairs. Marker files are left out.
    pub moved: Vec<(PathBuf, PathBuf)>,
    /// Incoming files left in the source because the name was taken.
    pub conflicts: Vec<PathBuf>,
    /// Non-fatal failures.
    pub warnings: Vec<String>,
    /// True if the emptied source folder was deleted.
    pub source_removed: bool,
}

/// What grouping a folder's files did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    /// One outcome per direct file child.
    pub relocations: Vec<Relocation>,
    /// True if the folder was deleted afterwards.
    pub source_removed: bool,
}

/// Moves folders under the destination root, merging with what is there.
#[derive(Debug, Clone, Default)]
pub struct FolderRelocator {
    files: FileRelocator,
}

impl FolderRelocator {
    /// Creates a folder relocator that delegates single files to `files`.
    #[must_use]
    pub const fn new(files: FileRelocator) -> Self {
        Self { files }
    }

    /// The category folder `folder` belongs in, or `None` for directly
    /// under the root.
    ///
    /// Only engine-owned folders are classified by name; any other folder
    /// belongs in `FOLDERS`.
    #[must_use]
    pub fn category_folder(&self, folder: &PathEntity) -> Option<Category> {
        if self.files.sentinels().is_owned(folder.path()) {
            self.files.classifier().folder_category(folder.name())
        } else {
            Some(Category::Folders)
        }
    }

    /// Move `folder` under `root`.
    ///
    /// The destination is `root/<group folder>/<name>` when the policy names
    /// a group folder, `root/<category>/<name>` otherwise, or `root/<name>`
    /// when the folder is itself a category folder. On success `folder` is
    /// re-pointed at the destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] for a relative root and
    /// [`Error::EmptyName`] for a blank group folder name.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::path::PathEntity;
    /// use sorter::relocate::{FolderRelocation, FolderRelocator, GroupPolicy};
    ///
    /// let root = tempfile::tempdir().unwrap();
    /// let album = root.path().join("album");
    /// std::fs::create_dir(&album).unwrap();
    /// std::fs::write(album.join("cover.png"), b"png").unwrap();
    ///
    /// let mut folder = PathEntity::new(&album).unwrap();
    /// let outcome = FolderRelocator::default()
    ///     .relocate(&mut folder, root.path(), &GroupPolicy::new())
    ///     .unwrap();
    ///
    /// assert!(matches!(outcome, FolderRelocation::Merged(_)));
    /// assert!(root.path().join("FOLDERS/album/cover.png").is_file());
    /// assert!(!album.exists());
    /// ```
    pub fn relocate(
        &self,
        folder: &mut PathEntity,
        root: &Path,
        policy: &GroupPolicy,
    ) -> Result<FolderRelocation> {
        if !root.is_absolute() {
            return Err(Error::RelativePath {
                path: root.to_path_buf(),
            });
        }
        policy.validate()?;

        let sentinels = self.files.sentinels();
        if sentinels.has_ignore_marker(folder.path()) {
            return Ok(FolderRelocation::Ignored);
        }
        if folder.path() == root {
            if policy.group {
                return Ok(FolderRelocation::Grouped(self.group(folder, root, policy)?));
            }
            return Ok(FolderRelocation::Unchanged);
        }

        let category_dir = match &policy.group_folder_name {
            Some(name) => Some(root.join(name)),
            None => self
                .category_folder(folder)
                .map(|category| root.join(category.label())),
        };
        let destination = category_dir
            .as_deref()
            .unwrap_or(root)
            .join(folder.name());

        if destination == folder.path() {
            return Ok(FolderRelocation::Unchanged);
        }
        if PathRelationship::is_within(&destination, folder.path()) {
            let reason = PathRelationship::Descendant.description(&destination, folder.path());
            log::warn!("not moving {}: {reason}", folder.path().display());
            return Ok(FolderRelocation::Blocked {
                path: folder.path().to_path_buf(),
                reason,
            });
        }

        let mut report = MergeReport {
            destination: destination.clone(),
            ..MergeReport::default()
        };
        self.merge(folder.path(), &destination, &mut report);

        if destination.is_dir() {
            for dir in std::iter::once(destination.as_path()).chain(category_dir.as_deref()) {
                if let Err(e) = sentinels.mark_owned(dir) {
                    report
                        .warnings
                        .push(format!("Could not mark \"{}\": {e}", dir.display()));
                }
            }
        }

        match fs::remove_dir(folder.path()) {
            Ok(()) => report.source_removed = true,
            Err(e) => {
                log::warn!("could not remove {}: {e}", folder.path().display());
                report.warnings.push(format!(
                    "Could not remove \"{}\": {e}",
                    folder.path().display()
                ));
            }
        }

        folder.set_path(&destination)?;
        Ok(FolderRelocation::Merged(report))
    }

    /// Relocate every direct file child of `folder` against `root` with
    /// grouping switched on, then try to remove `folder`.
    ///
    /// Marker files stay put and `root` itself is never removed.
    ///
    /// # Errors
    ///
    /// Returns the same precondition errors as [`FileRelocator::relocate`].
    pub fn group(
        &self,
        folder: &PathEntity,
        root: &Path,
        policy: &GroupPolicy,
    ) -> Result<GroupReport> {
        let sentinels = self.files.sentinels();
        let mut report = GroupReport::default();
        if sentinels.has_ignore_marker(folder.path()) {
            return Ok(report);
        }

        let grouped = policy.clone().with_group(true);
        grouped.validate()?;

        let files: Vec<PathBuf> = match fs::read_dir(folder.path()) {
            Ok(entries) => entries
                .filter_map(std::result::Result::ok)
                .filter(|e| e.file_type().is_ok_and(|t| t.is_file()))
                .filter(|e| !sentinels.is_marker_name(&e.file_name().to_string_lossy()))
                .map(|e| e.path())
                .collect(),
            Err(e) => {
                log::warn!("could not list {}: {e}", folder.path().display());
                return Ok(report);
            }
        };

        for path in files {
            let mut file = PathEntity::new(path)?;
            report
                .relocations
                .push(self.files.relocate(&mut file, root, &grouped)?);
        }

        if folder.path() != root {
            report.source_removed = fs::remove_dir(folder.path()).is_ok();
        }
        Ok(report)
    }

    /// Move everything under `src` into `dst`, file by file.
    ///
    /// The tree is snapshotted before anything moves. Folders are recreated
    /// at the destination, files whose name is taken stay behind, and the
    /// source folders are removed bottom-up once emptied.
    fn merge(&self, src: &Path, dst: &Path, report: &mut MergeReport) {
        if let Err(e) = fs::create_dir_all(dst) {
            report
                .warnings
                .push(format!("Could not create \"{}\": {e}", dst.display()));
            return;
        }

        let sentinels = self.files.sentinels();
        let mut entries = Vec::new();
        let walker = WalkDir::new(src)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && sentinels.has_ignore_marker(e.path())));
        for entry in walker {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    let path = e.path().unwrap_or(src).to_path_buf();
                    report
                        .warnings
                        .push(format!("Could not list \"{}\": {e}", path.display()));
                }
            }
        }

        let mut kept: Vec<PathBuf> = Vec::new();
        let mut folders = Vec::new();
        for entry in entries {
            let path = entry.path();
            if kept.iter().any(|k| path.starts_with(k)) {
                continue;
            }
            let Ok(relative) = path.strip_prefix(src) else {
                continue;
            };
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                if fs::symlink_metadata(&target).is_ok_and(|m| !m.is_dir()) {
                    log::debug!("{} is not a folder; keeping {}", target.display(), path.display());
                    report.conflicts.push(path.to_path_buf());
                    kept.push(path.to_path_buf());
                } else if let Err(e) = fs::create_dir_all(&target) {
                    report
                        .warnings
                        .push(format!("Could not create \"{}\": {e}", target.display()));
                    kept.push(path.to_path_buf());
                } else {
                    folders.push(path.to_path_buf());
                }
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name == sentinels.ignore() {
                continue;
            }
            let taken = fs::symlink_metadata(&target).is_ok();
            if name == sentinels.ownership() {
                let result = if taken {
                    fs::remove_file(path)
                } else {
                    move_file(path, &target)
                };
                if let Err(e) = result {
                    log::debug!("could not carry over {}: {e}", path.display());
                }
                continue;
            }
            if taken {
                log::debug!("{} exists; keeping {}", target.display(), path.display());
                report.conflicts.push(path.to_path_buf());
                continue;
            }
            match move_file(path, &target) {
                Ok(()) => report.moved.push((path.to_path_buf(), target)),
                Err(e) => {
                    log::warn!("could not move {}: {e}", path.display());
                    report
                        .warnings
                        .push(format!("Could not move \"{}\": {e}", path.display()));
                }
            }
        }

        for dir in folders.iter().rev() {
            if let Err(e) = fs::remove_dir(dir) {
                log::warn!("could not remove {}: {e}", dir.display());
                report
                    .warnings
                    .push(format!("Could not remove \"{}\": {e}", dir.display()));
            }
        }
    }
}
