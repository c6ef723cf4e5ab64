//! Grouping policy and the destination layouts it selects.

use std::path::{Path, PathBuf};

use crate::classify::Category;
use crate::error::{Error, Result};

/// How files are grouped under a destination root.
///
/// | `group` | `group_folder_name` | `by_extension` | layout                     |
/// |---------|---------------------|----------------|----------------------------|
/// | false   | any                 | any            | `root/EXT/file`            |
/// | true    | `None`              | false          | `root/category/file`       |
/// | true    | `None`              | true           | `root/category/EXT/file`   |
/// | true    | `Some(name)`        | false          | `root/name/file`           |
/// | true    | `Some(name)`        | true           | `root/name/EXT/file`       |
///
/// # Examples
///
/// ```
/// use sorter::relocate::{GroupPolicy, Layout};
///
/// let policy = GroupPolicy::new().with_group(true).with_by_extension(true);
/// assert_eq!(policy.layout().unwrap(), Layout::CategoryExtension);
///
/// let blank = GroupPolicy::new().with_group_folder_name(Some("  ".into()));
/// assert!(blank.layout().unwrap_err().is_precondition());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPolicy {
    /// Group into category or named folders instead of bare extension buckets.
    pub group: bool,

    /// Add an extension level under the group folder.
    pub by_extension: bool,

    /// Explicit group folder, used instead of the category when grouping.
    pub group_folder_name: Option<String>,
}

impl GroupPolicy {
    /// Creates the plain extension-bucket policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            group: false,
            by_extension: false,
            group_folder_name: None,
        }
    }

    /// Sets the `group` flag.
    #[must_use]
    pub const fn with_group(mut self, group: bool) -> Self {
        self.group = group;
        self
    }

    /// Sets the `by_extension` flag.
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

    /// Check the group folder name, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyName`] for a blank name and
    /// [`Error::Validation`] for a name that is not a single path component.
    pub fn validate(&self) -> Result<()> {
        let Some(name) = &self.group_folder_name else {
            return Ok(());
        };
        if name.trim().is_empty() {
            return Err(Error::EmptyName {
                field: "group_folder_name".to_string(),
            });
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::Validation {
                field: "group_folder_name".to_string(),
                message: format!("'{name}' must be a single folder name"),
            });
        }
        Ok(())
    }

    /// Select the layout this policy describes.
    ///
    /// # Errors
    ///
    /// Fails like [`validate`](Self::validate).
    pub fn layout(&self) -> Result<Layout<'_>> {
        self.validate()?;
        if !self.group {
            return Ok(Layout::ExtensionBucket);
        }
        Ok(match (&self.group_folder_name, self.by_extension) {
            (None, false) => Layout::Category,
            (None, true) => Layout::CategoryExtension,
            (Some(name), false) => Layout::Named(name),
            (Some(name), true) => Layout::NamedExtension(name),
        })
    }
}

/// A destination directory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout<'a> {
    /// `root/EXT`
    ExtensionBucket,
    /// `root/category`
    Category,
    /// `root/category/EXT`
    CategoryExtension,
    /// `root/name`
    Named(&'a str),
    /// `root/name/EXT`
    NamedExtension(&'a str),
}

impl Layout<'_> {
    /// The directory a file lands in under `root`.
    ///
    /// `extension_folder` is the uppercase bucket name (`PDF`, `UNDEFINED`).
    #[must_use]
    pub fn directory(&self, root: &Path, extension_folder: &str, category: Category) -> PathBuf {
        match self {
            Self::ExtensionBucket => root.join(extension_folder),
            Self::Category => root.join(category.label()),
            Self::CategoryExtension => root.join(category.label()).join(extension_folder),
            Self::Named(name) => root.join(name),
            Self::NamedExtension(name) => root.join(name).join(extension_folder),
        }
    }

    /// True for layouts that create two directory levels under the root.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::CategoryExtension | Self::NamedExtension(_))
    }
}
