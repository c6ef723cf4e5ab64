//! File and folder relocation.
//!
//! This module holds the parts of the engine that touch the filesystem:
//!
//! - [`NameResolver`] picks collision-free names (`report - dup (1).pdf`).
//! - [`Sentinels`] reads and writes the ownership and ignore markers.
//! - [`GroupPolicy`] selects one of the destination [`Layout`]s.
//! - [`FileRelocator`] moves a single file.
//! - [`FolderRelocator`] merges whole folders and groups folders in place.
//!
//! Contract violations (relative roots, blank group names) are returned as
//! errors before anything on disk changes. Failures met while moving are
//! returned as data (`Blocked` outcomes, warnings) so callers can carry on
//! with the next item.

mod file;
mod folder;
pub mod marker;
pub mod naming;
mod policy;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

use std::fs;
use std::io;
use std::path::Path;

pub use file::{FileRelocator, Relocation};
pub use folder::{FolderRelocation, FolderRelocator, GroupReport, MergeReport};
pub use marker::{Sentinels, DEFAULT_IGNORE_MARKER, DEFAULT_OWNERSHIP_MARKER};
pub use naming::{NameResolution, NameResolver, ResolutionStrategy, DEFAULT_MAX_NAME_ATTEMPTS};
pub use policy::{GroupPolicy, Layout};

/// Move a file, falling back to copy-then-delete when a rename is refused
/// for reasons other than permissions or a missing source.
///
/// The target must not exist.
pub(crate) fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ) =>
        {
            Err(e)
        }
        Err(e) => {
            log::debug!("rename {} failed ({e}); copying", from.display());
            fs::copy(from, to)?;
            if let Err(e) = fs::remove_file(from) {
                let _ = fs::remove_file(to);
                return Err(e);
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a.txt");
        let to = dir.path().join("b.txt");
        fs::write(&from, b"content").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"content");
    }

    #[test]
    fn test_move_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = move_file(&dir.path().join("missing"), &dir.path().join("b")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
