//! Error types for the sorter library.
//!
//! This module provides the error hierarchy for all sorter operations,
//! using `thiserror` for ergonomic error handling.
//!
//! Errors fall into two groups. Precondition violations (a relative path
//! handed to [`PathEntity`](crate::path::PathEntity), a blank group folder
//! name) are returned to the caller immediately. Environment failures met
//! while walking a tree are not errors at all from the caller's point of
//! view: the relocators turn them into warnings so that one locked file
//! cannot abort a whole sort.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a sorter error.
///
/// # Examples
///
/// ```
/// use sorter::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the sorter library.
#[derive(Debug, Error)]
pub enum Error {
    /// A relative path was given where an absolute one is required.
    #[error("relative paths cannot be used: {}", path.display())]
    RelativePath {
        /// The offending path.
        path: PathBuf,
    },

    /// A name that must be non-blank was empty or whitespace only.
    #[error("blank name not allowed for '{field}'")]
    EmptyName {
        /// The field carrying the blank name.
        field: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path expected to be a directory is not one.
    #[error("not a folder: {}", path.display())]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// A directory exists but cannot be written to.
    #[error("\"{}\" is not writable. Check folder and try again", path.display())]
    NotWritable {
        /// The read-only directory.
        path: PathBuf,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A glob pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    Glob(#[from] globset::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

impl Error {
    /// Check if error is a caller contract violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::Error;
    ///
    /// let err = Error::EmptyName { field: "group_folder_name".into() };
    /// assert!(err.is_precondition());
    /// ```
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::RelativePath { .. } | Self::EmptyName { .. })
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } | Self::NotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PermissionDenied { path: PathBuf::from("/restricted") };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::PermissionDenied { .. } | Self::NotWritable { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Check if error is a timeout waiting for the history database lock.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::DatabaseBusy
        )
    }
}
