//! Single-file relocation.

use std::fs;
use std::path::{Path, PathBuf};

use super::{move_file, GroupPolicy, NameResolver, Sentinels};
use crate::classify::Classifier;
use crate::error::{Error, Result};
use crate::path::PathEntity;

/// The outcome of relocating one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// The file was moved.
    Moved {
        /// Where the file was.
        from: PathBuf,
        /// Where the file is now.
        to: PathBuf,
    },
    /// The file already sits in its destination directory.
    Unchanged,
    /// The move failed; the file was left where it was.
    Blocked {
        /// The file that could not be moved.
        path: PathBuf,
        /// Why the move failed.
        reason: String,
    },
}

impl Relocation {
    /// True if the file changed location.
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }

    /// A user-facing warning for blocked moves.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Blocked { path, reason } => {
                Some(format!("Could not move \"{}\": {reason}", path.display()))
            }
            _ => None,
        }
    }
}

/// Moves files into the directory their grouping policy selects.
///
/// # Examples
///
/// ```
/// use sorter::path::PathEntity;
/// use sorter::relocate::{FileRelocator, GroupPolicy, Relocation};
///
/// let root = tempfile::tempdir().unwrap();
/// let source = root.path().join("report.pdf");
/// std::fs::write(&source, b"%PDF").unwrap();
///
/// let mut file = PathEntity::new(&source).unwrap();
/// let policy = GroupPolicy::new().with_group(true);
/// let outcome = FileRelocator::default()
///     .relocate(&mut file, root.path(), &policy)
///     .unwrap();
///
/// assert!(outcome.is_moved());
/// assert_eq!(file.path(), root.path().join("document").join("report.pdf"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileRelocator {
    classifier: Classifier,
    resolver: NameResolver,
    sentinels: Sentinels,
}

impl FileRelocator {
    /// Creates a relocator from its collaborators.
    #[must_use]
    pub const fn new(classifier: Classifier, resolver: NameResolver, sentinels: Sentinels) -> Self {
        Self {
            classifier,
            resolver,
            sentinels,
        }
    }

    /// The classifier in use.
    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// The sentinel names in use.
    #[must_use]
    pub const fn sentinels(&self) -> &Sentinels {
        &self.sentinels
    }

    /// The directory `file` belongs in under `root`.
    ///
    /// # Errors
    ///
    /// Fails if `policy` carries an invalid group folder name.
    pub fn destination_dir(
        &self,
        file: &PathEntity,
        root: &Path,
        policy: &GroupPolicy,
    ) -> Result<PathBuf> {
        let layout = policy.layout()?;
        let category = self.classifier.category_of(file.extension());
        Ok(layout.directory(root, &file.extension_folder(), category))
    }

    /// Move `file` into its destination under `root`.
    ///
    /// On success `file` is re-pointed at its new location. Filesystem
    /// failures are reported as [`Relocation::Blocked`] and leave `file`
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] if `root` is relative, and
    /// [`Error::EmptyName`] for a blank group folder name. Nothing on disk
    /// changes in either case.
    pub fn relocate(
        &self,
        file: &mut PathEntity,
        root: &Path,
        policy: &GroupPolicy,
    ) -> Result<Relocation> {
        if !root.is_absolute() {
            return Err(Error::RelativePath {
                path: root.to_path_buf(),
            });
        }
        let layout = policy.layout()?;
        let category = self.classifier.category_of(file.extension());
        let dir = layout.directory(root, &file.extension_folder(), category);

        if dir == file.parent() {
            return Ok(Relocation::Unchanged);
        }
        if !file.is_file() {
            return Ok(blocked(file.path(), "file no longer exists"));
        }

        let levels = if layout.is_nested() { 2 } else { 1 };
        let created: Vec<PathBuf> = dir
            .ancestors()
            .take(levels)
            .filter(|d| !d.exists())
            .map(Path::to_path_buf)
            .collect();
        if let Err(e) = fs::create_dir_all(&dir) {
            return Ok(blocked(file.path(), &e.to_string()));
        }

        let resolution = self.resolver.resolve(&dir.join(file.name()))?;
        let target = resolution.path_in(&dir);
        if let Err(e) = move_file(file.path(), &target) {
            for level in &created {
                if let Err(err) = fs::remove_dir(level) {
                    log::debug!("could not remove {}: {err}", level.display());
                }
            }
            return Ok(blocked(file.path(), &e.to_string()));
        }

        self.mark(&dir);
        if layout.is_nested() {
            if let Some(parent) = dir.parent() {
                self.mark(parent);
            }
        }

        let from = file.path().to_path_buf();
        file.set_path(&target)?;
        log::debug!("moved {} -> {}", from.display(), target.display());
        Ok(Relocation::Moved { from, to: target })
    }

    fn mark(&self, dir: &Path) {
        if let Err(e) = self.sentinels.mark_owned(dir) {
            log::warn!("could not mark {} as owned: {e}", dir.display());
        }
    }
}

fn blocked(path: &Path, reason: &str) -> Relocation {
    log::warn!("could not move {}: {reason}", path.display());
    Relocation::Blocked {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
