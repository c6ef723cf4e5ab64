//! Collision-free destination names.
//!
//! When a file named `report.pdf` already sits at the destination, the
//! incoming file becomes `report - dup (1).pdf`, then `report - dup (2).pdf`
//! and so on. An existing ` - dup (N)` tag on the incoming name is replaced
//! rather than stacked, so `report - dup (1).pdf` never turns into
//! `report - dup (1) - dup (1).pdf`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};
use crate::path::split_name;

/// Default bound on ` - dup (N)` probes before falling back to a hashed name.
pub const DEFAULT_MAX_NAME_ATTEMPTS: u32 = 10_000;

const DUP_OPEN: &str = " - dup (";

/// How a [`NameResolution`] was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// The candidate name was free.
    Original,
    /// A ` - dup (N)` suffix was applied.
    Suffixed(u32),
    /// Every suffix up to the bound was taken; a hash-derived name was used.
    Hashed,
}

/// A free file name and how it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolution {
    /// The resolved file name, without any directory.
    pub file_name: String,
    /// The strategy that produced `file_name`.
    pub strategy: ResolutionStrategy,
}

impl NameResolution {
    /// Join the resolved name onto `dir`.
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// Finds a file name that does not collide with anything on disk.
///
/// # Examples
///
/// ```
/// use sorter::relocate::{NameResolver, ResolutionStrategy};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("report.pdf"), b"old").unwrap();
///
/// let resolution = NameResolver::new().resolve(&dir.path().join("report.pdf")).unwrap();
/// assert_eq!(resolution.file_name, "report - dup (1).pdf");
/// assert_eq!(resolution.strategy, ResolutionStrategy::Suffixed(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameResolver {
    max_attempts: u32,
}

impl NameResolver {
    /// Create a resolver with the default attempt bound.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_attempts(DEFAULT_MAX_NAME_ATTEMPTS)
    }

    /// Create a resolver that gives up on suffixes after `max_attempts`.
    #[must_use]
    pub const fn with_max_attempts(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// The configured attempt bound.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Resolve `candidate` to a free file name in the same directory.
    ///
    /// Resolving twice against an unchanged directory gives the same answer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `candidate` has no file name.
    pub fn resolve(&self, candidate: &Path) -> Result<NameResolution> {
        let Some(name) = candidate.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Err(Error::InvalidPath {
                path: candidate.to_path_buf(),
                reason: "destination has no file name".to_string(),
            });
        };
        let dir = candidate.parent().unwrap_or_else(|| Path::new(""));

        if !occupied(candidate) {
            return Ok(NameResolution {
                file_name: name,
                strategy: ResolutionStrategy::Original,
            });
        }

        let (stem, ext) = split_name(&name);
        let base = strip_dup_tag(stem);
        let dot_ext = if ext.is_empty() {
            String::new()
        } else {
            format!(".{ext}")
        };

        for n in 1..=self.max_attempts {
            let file_name = format!("{base}{DUP_OPEN}{n}){dot_ext}");
            if !occupied(&dir.join(&file_name)) {
                return Ok(NameResolution {
                    file_name,
                    strategy: ResolutionStrategy::Suffixed(n),
                });
            }
        }

        let file_name = hashed_name(dir, candidate, &dot_ext);
        log::warn!(
            "{} duplicate names taken for {}; using {file_name}",
            self.max_attempts,
            candidate.display()
        );
        Ok(NameResolution {
            file_name,
            strategy: ResolutionStrategy::Hashed,
        })
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove one trailing ` - dup (N)` tag from a stem.
///
/// # Examples
///
/// ```
/// use sorter::relocate::naming::strip_dup_tag;
///
/// assert_eq!(strip_dup_tag("report - dup (12)"), "report");
/// assert_eq!(strip_dup_tag("report - dup ()"), "report - dup ()");
/// assert_eq!(strip_dup_tag("report (1)"), "report (1)");
/// ```
#[must_use]
pub fn strip_dup_tag(stem: &str) -> &str {
    let Some(inner) = stem.strip_suffix(')') else {
        return stem;
    };
    let Some(idx) = inner.rfind(DUP_OPEN) else {
        return stem;
    };
    let digits = &inner[idx + DUP_OPEN.len()..];
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        &stem[..idx]
    } else {
        stem
    }
}

fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn hashed_name(dir: &Path, candidate: &Path, dot_ext: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let mut salt: u64 = 0;
    loop {
        let mut hasher = blake3::Hasher::new();
        hasher.update(candidate.to_string_lossy().as_bytes());
        hasher.update(&nanos.to_le_bytes());
        hasher.update(&salt.to_le_bytes());
        let hex = hasher.finalize().to_hex();
        let file_name = format!("{}{dot_ext}", &hex[..32]);
        if !occupied(&dir.join(&file_name)) {
            return file_name;
        }
        salt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn test_free_name_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let resolution = NameResolver::new()
            .resolve(&dir.path().join("report.pdf"))
            .unwrap();
        assert_eq!(resolution.file_name, "report.pdf");
        assert_eq!(resolution.strategy, ResolutionStrategy::Original);
    }

    #[test]
    fn test_suffix_counts_existing_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "report.pdf");
        touch(dir.path(), "report - dup (1).pdf");
        touch(dir.path(), "report - dup (2).pdf");

        let resolution = NameResolver::new()
            .resolve(&dir.path().join("report.pdf"))
            .unwrap();
        assert_eq!(resolution.file_name, "report - dup (3).pdf");
        assert_eq!(resolution.strategy, ResolutionStrategy::Suffixed(3));
        assert_eq!(
            resolution.path_in(dir.path()),
            dir.path().join("report - dup (3).pdf")
        );
    }

    #[test]
    fn test_existing_tag_is_replaced_not_stacked() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "report - dup (1).pdf");

        let resolution = NameResolver::new()
            .resolve(&dir.path().join("report - dup (1).pdf"))
            .unwrap();
        assert_eq!(resolution.file_name, "report - dup (2).pdf");
    }

    #[test]
    fn test_resolve_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        let resolver = NameResolver::new();
        let candidate = dir.path().join("notes.txt");
        assert_eq!(
            resolver.resolve(&candidate).unwrap(),
            resolver.resolve(&candidate).unwrap()
        );
    }

    #[test]
    fn test_extensionless_and_dotfile_names() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Makefile");
        touch(dir.path(), ".env");
        let resolver = NameResolver::new();

        let make = resolver.resolve(&dir.path().join("Makefile")).unwrap();
        assert_eq!(make.file_name, "Makefile - dup (1)");
        let env = resolver.resolve(&dir.path().join(".env")).unwrap();
        assert_eq!(env.file_name, ".env - dup (1)");
    }

    #[test]
    fn test_directory_counts_as_taken() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("photo.png")).unwrap();
        let resolution = NameResolver::new()
            .resolve(&dir.path().join("photo.png"))
            .unwrap();
        assert_eq!(resolution.file_name, "photo - dup (1).png");
    }

    #[test]
    fn test_hash_fallback_after_bound() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.txt");
        touch(dir.path(), "a - dup (1).txt");
        touch(dir.path(), "a - dup (2).txt");

        let resolution = NameResolver::with_max_attempts(2)
            .resolve(&dir.path().join("a.txt"))
            .unwrap();
        assert_eq!(resolution.strategy, ResolutionStrategy::Hashed);
        assert!(
            Path::new(&resolution.file_name)
                .extension()
                .is_some_and(|e| e == "txt")
        );
        assert!(!dir.path().join(&resolution.file_name).exists());
    }

    #[test]
    fn test_candidate_without_file_name() {
        let err = NameResolver::new().resolve(Path::new("/")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_strip_dup_tag() {
        assert_eq!(strip_dup_tag("a - dup (1)"), "a");
        assert_eq!(strip_dup_tag("a - dup (1) - dup (2)"), "a - dup (1)");
        assert_eq!(strip_dup_tag("a - dup (x)"), "a - dup (x)");
        assert_eq!(strip_dup_tag("a"), "a");
    }
}
