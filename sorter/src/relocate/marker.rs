//! Ownership and ignore sentinel files.
//!
//! A folder containing the ownership marker was created or organised by the
//! engine. A folder containing the ignore marker is never touched. Both
//! markers are empty, dot-prefixed files whose names are part of the on-disk
//! format: trees organised by earlier runs rely on them.

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::classify::Classifier;
use crate::error::Result;

/// Default ownership marker file name.
pub const DEFAULT_OWNERSHIP_MARKER: &str = ".sorter";

/// Default ignore marker file name.
pub const DEFAULT_IGNORE_MARKER: &str = ".signore";

/// The pair of sentinel file names in use.
///
/// # Examples
///
/// ```
/// use sorter::relocate::Sentinels;
///
/// let dir = tempfile::tempdir().unwrap();
/// let sentinels = Sentinels::default();
///
/// assert!(!sentinels.is_owned(dir.path()));
/// sentinels.mark_owned(dir.path()).unwrap();
/// assert!(sentinels.is_owned(dir.path()));
/// assert!(dir.path().join(".sorter").is_file());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinels {
    ownership: String,
    ignore: String,
    classifier: Classifier,
}

impl Sentinels {
    /// Create sentinels with custom marker names.
    ///
    /// Names are validated by the configuration layer, not here.
    #[must_use]
    pub fn new(ownership: impl Into<String>, ignore: impl Into<String>) -> Self {
        Self {
            ownership: ownership.into(),
            ignore: ignore.into(),
            classifier: Classifier::new(),
        }
    }

    /// Use `classifier` for the name-based ownership fallback.
    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// The ownership marker file name.
    #[must_use]
    pub fn ownership(&self) -> &str {
        &self.ownership
    }

    /// The ignore marker file name.
    #[must_use]
    pub fn ignore(&self) -> &str {
        &self.ignore
    }

    /// True if `name` is either marker's file name.
    #[must_use]
    pub fn is_marker_name(&self, name: &str) -> bool {
        name == self.ownership || name == self.ignore
    }

    /// Place the ownership marker in `dir`. Does nothing if already present.
    ///
    /// On Windows the marker also gets the hidden attribute.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the marker cannot be created.
    pub fn mark_owned(&self, dir: &Path) -> Result<()> {
        let marker = dir.join(&self.ownership);
        if marker.is_file() {
            return Ok(());
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(false);
        #[cfg(windows)]
        {
            use std::os::windows::fs::OpenOptionsExt;
            const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
            options.attributes(FILE_ATTRIBUTE_HIDDEN);
        }
        options.open(&marker)?;
        log::debug!("marked {} as owned", dir.display());
        Ok(())
    }

    /// True if `dir` carries the ownership marker, or its name is one the
    /// engine gives to the folders it creates.
    ///
    /// The name check recognises trees organised before markers existed.
    #[must_use]
    pub fn is_owned(&self, dir: &Path) -> bool {
        if dir.join(&self.ownership).is_file() {
            return true;
        }
        dir.file_name()
            .is_some_and(|name| self.classifier.is_category_folder_name(&name.to_string_lossy()))
    }

    /// True if the ignore marker sits directly inside `dir`.
    #[must_use]
    pub fn has_ignore_marker(&self, dir: &Path) -> bool {
        dir.join(&self.ignore).is_file()
    }

    /// Place the ignore marker in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the marker cannot be written.
    pub fn mark_ignored(&self, dir: &Path) -> Result<()> {
        fs::write(dir.join(&self.ignore), b"")?;
        Ok(())
    }
}

impl Default for Sentinels {
    fn default() -> Self {
        Self::new(DEFAULT_OWNERSHIP_MARKER, DEFAULT_IGNORE_MARKER)
    }
}
