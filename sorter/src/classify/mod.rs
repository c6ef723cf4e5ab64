//! Extension to category classification.
//!
//! A file's category is a pure function of its extension, looked up in the
//! static [`EXTENSION_TABLE`]. Folders are classified by name: an engine-made
//! extension bucket such as `PDF` belongs to the `document` category, a folder
//! literally named `document` already *is* a category folder, and everything
//! else falls back to [`Category::Folders`].
//!
//! # Examples
//!
//! ```
//! use sorter::{Category, Classifier};
//!
//! let classifier = Classifier::new();
//! assert_eq!(classifier.category_of("pdf"), Category::Document);
//! assert_eq!(classifier.category_of("PDF"), Category::Document);
//! assert_eq!(classifier.category_of("xyz"), Category::Undefined);
//! assert_eq!(classifier.category_of(""), Category::Undefined);
//! ```

mod category;
pub mod table;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use category::Category;
pub use table::{extensions_for, is_known_extension, EXTENSION_TABLE};

/// The shape of an extension table.
pub type ExtensionTable = &'static [(Category, &'static [&'static str])];

/// Maps extensions and folder names to categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    table: ExtensionTable,
}

impl Classifier {
    /// Create a classifier over the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(EXTENSION_TABLE)
    }

    /// Create a classifier over a custom table.
    ///
    /// Extensions in `table` must be uppercase and unique across categories.
    #[must_use]
    pub const fn with_table(table: ExtensionTable) -> Self {
        Self { table }
    }

    /// The category of a file extension, compared case-insensitively.
    ///
    /// Empty or unmapped extensions yield [`Category::Undefined`].
    #[must_use]
    pub fn category_of(&self, extension: &str) -> Category {
        if extension.is_empty() {
            return Category::Undefined;
        }
        let upper = extension.to_uppercase();
        self.table
            .iter()
            .find(|(_, exts)| exts.contains(&upper.as_str()))
            .map_or(Category::Undefined, |(category, _)| *category)
    }

    /// The category folder an engine-owned folder belongs under.
    ///
    /// Returns `None` when the folder itself is a category folder and so
    /// belongs directly under the destination root.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorter::{Category, Classifier};
    ///
    /// let classifier = Classifier::new();
    /// assert_eq!(classifier.folder_category("PDF"), Some(Category::Document));
    /// assert_eq!(classifier.folder_category("document"), None);
    /// assert_eq!(classifier.folder_category("Holiday"), Some(Category::Folders));
    /// ```
    #[must_use]
    pub fn folder_category(&self, name: &str) -> Option<Category> {
        if Category::from_label(name).is_some() {
            return None;
        }
        if is_upper(name) {
            match self.category_of(name) {
                Category::Undefined => {}
                category => return Some(category),
            }
        }
        Some(Category::Folders)
    }

    /// True if `name` is one the engine itself gives to folders.
    ///
    /// That is an uppercase extension bucket (`PDF`, `UNDEFINED`), the
    /// `FOLDERS` fallback, or a category label (`document`).
    #[must_use]
    pub fn is_category_folder_name(&self, name: &str) -> bool {
        if Category::from_label(name).is_some() {
            return true;
        }
        is_upper(name) && self.category_of(name) != Category::Undefined
    }

    /// The underlying table.
    #[must_use]
    pub const fn table(&self) -> ExtensionTable {
        self.table
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn is_upper(name: &str) -> bool {
    name.chars().any(char::is_alphabetic) && !name.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_of_known_extensions() {
        let classifier = Classifier::new();
        assert_eq!(classifier.category_of("txt"), Category::Document);
        assert_eq!(classifier.category_of("pdf"), Category::Document);
        assert_eq!(classifier.category_of("jpeg"), Category::Image);
        assert_eq!(classifier.category_of("png"), Category::Image);
        assert_eq!(classifier.category_of("php"), Category::Developer);
        assert_eq!(classifier.category_of("zip"), Category::Archive);
        assert_eq!(classifier.category_of("gz"), Category::Archive);
        assert_eq!(classifier.category_of("mp4"), Category::Video);
        assert_eq!(classifier.category_of("apk"), Category::Installer);
        assert_eq!(classifier.category_of("pptx"), Category::Presentation);
    }

    #[test]
    fn test_category_of_is_case_insensitive() {
        let classifier = Classifier::new();
        for ext in ["pdf", "PDF", "Pdf", "pDf"] {
            assert_eq!(classifier.category_of(ext), Category::Document);
        }
    }

    #[test]
    fn test_category_of_fallback() {
        let classifier = Classifier::new();
        assert_eq!(classifier.category_of(""), Category::Undefined);
        assert_eq!(classifier.category_of("exist"), Category::Undefined);
    }

    #[test]
    fn test_custom_table() {
        static TABLE: &[(Category, &[&str])] = &[(Category::Audio, &["PDF"])];
        let classifier = Classifier::with_table(TABLE);
        assert_eq!(classifier.category_of("pdf"), Category::Audio);
        assert_eq!(classifier.category_of("txt"), Category::Undefined);
    }

    #[test]
    fn test_folder_category() {
        let classifier = Classifier::new();
        assert_eq!(classifier.folder_category("PDF"), Some(Category::Document));
        assert_eq!(classifier.folder_category("MP3"), Some(Category::Audio));
        assert_eq!(classifier.folder_category("image"), None);
        assert_eq!(classifier.folder_category("FOLDERS"), None);
        assert_eq!(classifier.folder_category("pdf"), Some(Category::Folders));
        assert_eq!(classifier.folder_category("sample"), Some(Category::Folders));
    }

    #[test]
    fn test_is_category_folder_name() {
        let classifier = Classifier::new();
        assert!(!classifier.is_category_folder_name("sample"));
        assert!(classifier.is_category_folder_name("developer"));
        assert!(classifier.is_category_folder_name("FOLDERS"));
        assert!(classifier.is_category_folder_name("UNDEFINED"));
        assert!(classifier.is_category_folder_name("PDF"));
        assert!(classifier.is_category_folder_name("7Z"));
        assert!(!classifier.is_category_folder_name("EXIST"));
        assert!(!classifier.is_category_folder_name("Pdf"));
        assert!(!classifier.is_category_folder_name("Developer"));
    }
}
