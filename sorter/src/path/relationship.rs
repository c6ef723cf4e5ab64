//! Ancestor/descendant checks between two absolute paths.
//!
//! Sorting a tree into a destination that lives inside it, or moving a folder
//! underneath itself, must be caught before any filesystem call. Both checks
//! are purely lexical.

use std::path::Path;

/// How two paths relate in the directory hierarchy.
///
/// # Examples
///
/// ```
/// use sorter::path::PathRelationship;
/// use std::path::Path;
///
/// let source = Path::new("/home/me/Downloads");
/// let sorted = Path::new("/home/me/Downloads/sorted");
///
/// assert_eq!(
///     PathRelationship::between(source, sorted),
///     PathRelationship::Ancestor
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRelationship {
    /// The first path contains the second.
    Ancestor,
    /// The first path lies beneath the second.
    Descendant,
    /// Both paths name the same location.
    Same,
    /// Neither path contains the other.
    Unrelated,
}

impl PathRelationship {
    /// Determine the relationship between two paths.
    ///
    /// Comparison is component-wise, so `/a/bc` is not beneath `/a/b` and a
    /// trailing separator is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::path::PathRelationship;
    /// use std::path::Path;
    ///
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/b"), Path::new("/a")),
    ///     PathRelationship::Descendant
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/"), Path::new("/a")),
    ///     PathRelationship::Same
    /// );
    /// assert_eq!(
    ///     PathRelationship::between(Path::new("/a/bc"), Path::new("/a/b")),
    ///     PathRelationship::Unrelated
    /// );
    /// ```
    #[must_use]
    pub fn between(path1: &Path, path2: &Path) -> Self {
        if path1.components().eq(path2.components()) {
            Self::Same
        } else if path2.starts_with(path1) {
            Self::Ancestor
        } else if path1.starts_with(path2) {
            Self::Descendant
        } else {
            Self::Unrelated
        }
    }

    /// True if `path` is `directory` or lies beneath it.
    #[must_use]
    pub fn is_within(path: &Path, directory: &Path) -> bool {
        matches!(
            Self::between(path, directory),
            Self::Descendant | Self::Same
        )
    }

    /// True if `path` is `other` or contains it.
    #[must_use]
    pub fn contains(path: &Path, other: &Path) -> bool {
        matches!(Self::between(path, other), Self::Ancestor | Self::Same)
    }

    /// A human-readable description of the relationship.
    #[must_use]
    pub fn description(&self, path1: &Path, path2: &Path) -> String {
        let (p1, p2) = (path1.display(), path2.display());
        match self {
            Self::Ancestor => format!("{p1} contains {p2}"),
            Self::Descendant => format!("{p1} is inside {p2}"),
            Self::Same => format!("{p1} and {p2} are the same folder"),
            Self::Unrelated => format!("{p1} and {p2} are unrelated"),
        }
    }
}
