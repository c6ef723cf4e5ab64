//! Immutable snapshots of a file or folder location.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A file or folder location and the attributes derived from it.
///
/// Every field is computed from the absolute path at construction time.
/// [`set_path`](Self::set_path) builds a complete new snapshot before
/// replacing the old one, so a half-updated entity is never observable.
///
/// Extension splitting follows "last dot in the final component" rules:
///
/// | name          | extension | stem          |
/// |---------------|-----------|---------------|
/// | `report.PDF`  | `pdf`     | `report`      |
/// | `a.tar.gz`    | `gz`      | `a.tar`       |
/// | `Makefile`    | ``        | `Makefile`    |
/// | `.gitignore`  | ``        | `.gitignore`  |
/// | `notes.`      | ``        | `notes.`      |
///
/// # Examples
///
/// ```
/// use sorter::path::PathEntity;
///
/// let entity = PathEntity::new("/home/me/Downloads/report.PDF").unwrap();
/// assert_eq!(entity.name(), "report.PDF");
/// assert_eq!(entity.extension(), "pdf");
/// assert_eq!(entity.stem(), "report");
/// assert!(!entity.is_hidden_path());
///
/// assert!(PathEntity::new("relative/report.pdf").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntity {
    path: PathBuf,
    parent: PathBuf,
    name: String,
    extension: String,
    stem: String,
    hidden_path: bool,
}

impl PathEntity {
    /// Snapshot an absolute path.
    ///
    /// The path does not need to exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] if `path` is not absolute.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(Error::RelativePath { path });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = path.parent().map_or_else(|| path.clone(), Path::to_path_buf);
        let (stem, extension) = split_name(&name);
        let hidden_path = in_hidden_path(&path);

        Ok(Self {
            parent,
            stem: stem.to_string(),
            extension: extension.to_lowercase(),
            name,
            hidden_path,
            path,
        })
    }

    /// Re-point this entity at `path`, re-deriving every attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RelativePath`] if `path` is not absolute; the entity
    /// is left unchanged in that case.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        *self = Self::new(path)?;
        Ok(())
    }

    /// The absolute path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The absolute path of the containing directory.
    ///
    /// For a filesystem root this is the root itself.
    #[must_use]
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// The final path component, including any extension.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The lowercased extension without its dot, or `""` when there is none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// The name without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// The extension in the form used for bucket folder names: uppercase,
    /// or `UNDEFINED` when the name has none.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::path::PathEntity;
    ///
    /// assert_eq!(PathEntity::new("/x/a.pdf").unwrap().extension_folder(), "PDF");
    /// assert_eq!(PathEntity::new("/x/Makefile").unwrap().extension_folder(), "UNDEFINED");
    /// ```
    #[must_use]
    pub fn extension_folder(&self) -> String {
        if self.extension.is_empty() {
            crate::classify::Category::Undefined.label().to_string()
        } else {
            self.extension.to_uppercase()
        }
    }

    /// True if this path or any ancestor is hidden.
    ///
    /// On Unix-like systems a component is hidden when its name starts with
    /// `.` or `__`. On Windows each prefix of the path is checked for the
    /// hidden file attribute.
    #[must_use]
    pub fn is_hidden_path(&self) -> bool {
        self.hidden_path
    }

    /// True if the path currently exists as a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    /// True if the path currently exists as a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }
}

impl fmt::Display for PathEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for PathEntity {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Split a file name at its last dot.
///
/// A dot in first or last position does not start an extension.
pub(crate) fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => (&name[..idx], &name[idx + 1..]),
        _ => (name, ""),
    }
}

/// True if a single name component marks its entry as hidden on Unix.
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') || name.starts_with("__")
}

#[cfg(not(windows))]
fn in_hidden_path(path: &Path) -> bool {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(name) => Some(name),
            _ => None,
        })
        .any(|name| is_hidden_name(&name.to_string_lossy()))
}

#[cfg(windows)]
fn in_hidden_path(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    path.ancestors().any(|prefix| {
        prefix.parent().is_some()
            && std::fs::metadata(prefix)
                .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
                .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_rejected() {
        let err = PathEntity::new("docs/report.pdf").unwrap_err();
        assert!(matches!(err, Error::RelativePath { .. }));

        let err = PathEntity::new(".").unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_derived_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("my awesome cat.txt");
        std::fs::write(&file, "").unwrap();

        let entity = PathEntity::new(&file).unwrap();
        assert_eq!(entity.path(), file.as_path());
        assert_eq!(entity.parent(), dir.path());
        assert_eq!(entity.name(), "my awesome cat.txt");
        assert_eq!(entity.stem(), "my awesome cat");
        assert_eq!(entity.extension(), "txt");
        assert_eq!(entity.to_string(), file.display().to_string());
        assert!(entity.is_file());
        assert!(!entity.is_dir());
    }

    #[test]
    fn test_extension_edge_cases() {
        let cases = [
            ("report.PDF", "report", "pdf"),
            ("coverage-4.4.1.tar.gz", "coverage-4.4.1.tar", "gz"),
            ("Makefile", "Makefile", ""),
            (".gitignore", ".gitignore", ""),
            ("notes.", "notes.", ""),
            ("..", "..", ""),
        ];
        for (name, stem, ext) in cases {
            let entity = PathEntity::new(Path::new("/data").join(name)).unwrap();
            assert_eq!(entity.stem(), stem, "stem of {name}");
            assert_eq!(entity.extension(), ext, "extension of {name}");
        }
    }

    #[test]
    fn test_extension_folder() {
        let pdf = PathEntity::new("/data/report.pdf").unwrap();
        assert_eq!(pdf.extension_folder(), "PDF");
        let bare = PathEntity::new("/data/.bashrc").unwrap();
        assert_eq!(bare.extension_folder(), "UNDEFINED");
    }

    #[test]
    fn test_set_path_rederives_everything() {
        let mut entity = PathEntity::new("/data/inbox/report.pdf").unwrap();
        entity.set_path("/data/.archive/photo.JPEG").unwrap();

        assert_eq!(entity.name(), "photo.JPEG");
        assert_eq!(entity.parent(), Path::new("/data/.archive"));
        assert_eq!(entity.extension(), "jpeg");
        assert_eq!(entity.stem(), "photo");
        #[cfg(not(windows))]
        assert!(entity.is_hidden_path());
    }

    #[test]
    fn test_set_path_relative_leaves_entity_untouched() {
        let mut entity = PathEntity::new("/data/inbox/report.pdf").unwrap();
        let before = entity.clone();
        assert!(entity.set_path("report.pdf").is_err());
        assert_eq!(entity, before);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_hidden_path_detection() {
        assert!(!PathEntity::new("/home/me/docs/a.txt").unwrap().is_hidden_path());
        assert!(PathEntity::new("/home/me/.cache/a.txt").unwrap().is_hidden_path());
        assert!(PathEntity::new("/home/me/__pycache__/a.pyc").unwrap().is_hidden_path());
        assert!(PathEntity::new("/home/me/docs/.a.txt").unwrap().is_hidden_path());
        assert!(!PathEntity::new("/home/me/docs_/a_.txt").unwrap().is_hidden_path());
    }

    #[test]
    fn test_root_has_itself_as_parent() {
        #[cfg(not(windows))]
        let root = PathEntity::new("/").unwrap();
        #[cfg(windows)]
        let root = PathEntity::new("C:\\").unwrap();
        assert_eq!(root.parent(), root.path());
        assert_eq!(root.name(), "");
    }
}
