//! Normalisation of user-supplied paths.
//!
//! Front ends accept paths such as `~/Downloads` or `../inbox`; the engine
//! only accepts absolute paths. These helpers bridge the two without touching
//! the filesystem, so symlinks are preserved and the path need not exist yet.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// Only `~` and `~/rest` are supported; `~user` is rejected.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory is
/// unknown, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use sorter::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/Downloads")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("Downloads"));
///
/// assert_eq!(expand_tilde(Path::new("/srv")).unwrap(), Path::new("/srv"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Path contains invalid UTF-8".to_string(),
        });
    };

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    match path_str {
        "~" => Ok(home),
        rest if rest.starts_with("~/") || rest.starts_with("~\\") => Ok(home.join(&rest[2..])),
        _ => Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        }),
    }
}

/// Lexically remove `.` and `..` components.
///
/// # Errors
///
/// Returns an error if `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use sorter::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/home/me/./inbox/../Desktop")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/home/me/Desktop"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = result.parent().is_none();
                if at_root || !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    Ok(result)
}

/// Turn any user-supplied path into an absolute, lexically clean one.
///
/// Relative paths are resolved against the current directory.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory is
/// unavailable, or the path escapes the root.
///
/// # Examples
///
/// ```no_run
/// use sorter::path::normalize::normalize;
/// use std::path::Path;
///
/// let inbox = normalize(Path::new("./inbox")).unwrap();
/// assert!(inbox.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
