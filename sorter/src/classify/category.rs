//! Semantic file categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A semantic grouping of file extensions.
///
/// Real categories render in lowercase (`document`, `image`, ...). The two
/// reserved fallbacks render in uppercase: [`Category::Undefined`] for files
/// whose extension is unmapped and [`Category::Folders`] for folders that are
/// not themselves category or extension folders.
///
/// # Examples
///
/// ```
/// use sorter::Category;
///
/// assert_eq!(Category::Document.label(), "document");
/// assert_eq!(Category::Undefined.label(), "UNDEFINED");
/// assert_eq!("image".parse::<Category>().unwrap(), Category::Image);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Compressed bundles and disk images.
    Archive,
    /// Sound and music files.
    Audio,
    /// Database files.
    Database,
    /// Source code and project files.
    Developer,
    /// Text and office documents.
    Document,
    /// Electronic books.
    Ebook,
    /// Programs and scripts that run directly.
    Executable,
    /// Font files.
    Font,
    /// Raster and vector images.
    Image,
    /// Platform installer packages.
    Installer,
    /// Slide decks.
    Presentation,
    /// Tabular documents.
    Spreadsheet,
    /// Video files.
    Video,
    /// Fallback for files whose extension is unknown or missing.
    #[serde(rename = "UNDEFINED")]
    Undefined,
    /// Fallback for folders that do not name a category.
    #[serde(rename = "FOLDERS")]
    Folders,
}

impl Category {
    /// Every non-reserved category, in label order.
    pub const ALL: [Self; 13] = [
        Self::Archive,
        Self::Audio,
        Self::Database,
        Self::Developer,
        Self::Document,
        Self::Ebook,
        Self::Executable,
        Self::Font,
        Self::Image,
        Self::Installer,
        Self::Presentation,
        Self::Spreadsheet,
        Self::Video,
    ];

    /// The folder name used for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Audio => "audio",
            Self::Database => "database",
            Self::Developer => "developer",
            Self::Document => "document",
            Self::Ebook => "ebook",
            Self::Executable => "executable",
            Self::Font => "font",
            Self::Image => "image",
            Self::Installer => "installer",
            Self::Presentation => "presentation",
            Self::Spreadsheet => "spreadsheet",
            Self::Video => "video",
            Self::Undefined => "UNDEFINED",
            Self::Folders => "FOLDERS",
        }
    }

    /// True for the two fallback categories.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::Undefined | Self::Folders)
    }

    /// Look up a category by its exact label.
    ///
    /// Matching is case-sensitive: `document` is a category folder,
    /// `Document` is an ordinary user folder.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .chain([Self::Undefined, Self::Folders])
            .find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s.trim()).ok_or_else(|| Error::NotFound {
            resource: format!("category '{s}'"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Category::ALL.len());
    }

    #[test]
    fn test_all_excludes_reserved() {
        assert!(Category::ALL.iter().all(|c| !c.is_reserved()));
        assert!(Category::Undefined.is_reserved());
        assert!(Category::Folders.is_reserved());
    }

    #[test]
    fn test_from_label_is_case_sensitive() {
        assert_eq!(Category::from_label("video"), Some(Category::Video));
        assert_eq!(Category::from_label("FOLDERS"), Some(Category::Folders));
        assert_eq!(Category::from_label("Video"), None);
        assert_eq!(Category::from_label("folders"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!(" audio ".parse::<Category>().unwrap(), Category::Audio);
        let err = "sample".parse::<Category>().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&Category::Spreadsheet).unwrap(),
            "\"spreadsheet\""
        );
        assert_eq!(
            serde_json::to_string(&Category::Undefined).unwrap(),
            "\"UNDEFINED\""
        );
        let parsed: Category = serde_json::from_str("\"FOLDERS\"").unwrap();
        assert_eq!(parsed, Category::Folders);
    }
}
