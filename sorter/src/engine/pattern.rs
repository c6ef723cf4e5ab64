//! Case-insensitive name matching.
//!
//! A search string is turned into a glob by expanding every letter into a
//! two-letter class (`a` becomes `[aA]`) and joining whitespace-separated
//! words with `?`, so `"tax 2023"` matches `Tax_2023.pdf` and
//! `TAX-2023 draft.docx`. File-type filters are expanded the same way.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::Result;

const GLOB_SPECIALS: &[char] = &['*', '?', '[', ']', '{', '}', '\\', '!'];

/// Expand every cased letter of `text` into a bracket class matching both
/// cases. Glob metacharacters are escaped.
///
/// # Examples
///
/// ```
/// use sorter::engine::pattern::insensitize;
///
/// assert_eq!(insensitize("Pdf"), "[pP][dD][fF]");
/// assert_eq!(insensitize("a-1"), "[aA]-1");
/// assert_eq!(insensitize("x*"), "[xX]\\*");
/// ```
#[must_use]
pub fn insensitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 4);
    for c in text.chars() {
        match (single(c.to_lowercase()), single(c.to_uppercase())) {
            (Some(lower), Some(upper)) if lower != upper => {
                out.push('[');
                out.push(lower);
                out.push(upper);
                out.push(']');
            }
            _ if GLOB_SPECIALS.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// The name part of a glob for `search`: empty when there is nothing to
/// search for, otherwise `*` followed by the insensitized words joined
/// with `?`.
///
/// # Examples
///
/// ```
/// use sorter::engine::pattern::form_search_pattern;
///
/// assert_eq!(form_search_pattern(None), "");
/// assert_eq!(form_search_pattern(Some("  ")), "");
/// assert_eq!(form_search_pattern(Some("a b")), "*[aA]?[bB]");
/// ```
#[must_use]
pub fn form_search_pattern(search: Option<&str>) -> String {
    let words: Vec<String> = search
        .unwrap_or_default()
        .split_whitespace()
        .map(insensitize)
        .collect();
    if words.is_empty() {
        String::new()
    } else {
        format!("*{}", words.join("?"))
    }
}

/// Normalise a file-type filter: surrounding whitespace and a leading dot
/// are dropped. `None` means "any type".
fn file_type_filter(file_type: &str) -> Option<&str> {
    let trimmed = file_type.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    (!trimmed.is_empty() && trimmed != "*").then_some(trimmed)
}

/// Matches directory entry names against a search string and a list of
/// file types.
///
/// # Examples
///
/// ```
/// use sorter::engine::pattern::FileMatcher;
///
/// let matcher = FileMatcher::files(Some("annual report"), &["pdf".to_string()]).unwrap();
/// assert!(matcher.is_match("2023 Annual_Report.PDF"));
/// assert!(!matcher.is_match("annual report.docx"));
///
/// let folders = FileMatcher::folders(Some("trip")).unwrap();
/// assert!(folders.is_match("Trip to Rome"));
/// ```
#[derive(Debug, Clone)]
pub struct FileMatcher {
    set: GlobSet,
    patterns: Vec<String>,
}

impl FileMatcher {
    /// A matcher for file names.
    ///
    /// An empty `file_types` list, or one containing `*`, accepts every
    /// type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Glob`](crate::Error::Glob) if a pattern cannot be
    /// compiled.
    pub fn files(search: Option<&str>, file_types: &[String]) -> Result<Self> {
        let name = form_search_pattern(search);
        let filters: Option<Vec<&str>> = file_types.iter().map(|t| file_type_filter(t)).collect();
        let patterns = match filters {
            Some(types) if !types.is_empty() => types
                .into_iter()
                .map(|t| format!("{name}*.{}", insensitize(t)))
                .collect(),
            _ => vec![format!("{name}*")],
        };
        Self::from_patterns(patterns)
    }

    /// A matcher for folder names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Glob`](crate::Error::Glob) if the pattern cannot be
    /// compiled.
    pub fn folders(search: Option<&str>) -> Result<Self> {
        Self::from_patterns(vec![format!("{}*", form_search_pattern(search))])
    }

    fn from_patterns(patterns: Vec<String>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            builder.add(
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .build()?,
            );
        }
        Ok(Self {
            set: builder.build()?,
            patterns,
        })
    }

    /// True if `name` (a single path component) matches.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.set.is_match(name)
    }

    /// The compiled glob patterns, for diagnostics.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
