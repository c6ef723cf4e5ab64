//! The static extension table.
//!
//! Extensions are stored uppercase, exactly as they appear in extension
//! bucket folder names. Each extension belongs to at most one category.

use super::Category;

/// Category to extensions mapping, loaded once and never mutated.
pub static EXTENSION_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Archive,
        &[
            "7Z", "ACE", "ALZ", "ARJ", "BZ2", "CAB", "CPIO", "GZ", "ISO", "LZ", "LZ4", "LZMA",
            "RAR", "TAR", "TBZ2", "TGZ", "TXZ", "XZ", "Z", "ZIP", "ZST",
        ],
    ),
    (
        Category::Audio,
        &[
            "AAC", "AIF", "AIFF", "AMR", "APE", "AU", "FLAC", "M4A", "MID", "MIDI", "MKA", "MP2",
            "MP3", "OGG", "OPUS", "RA", "WAV", "WMA",
        ],
    ),
    (
        Category::Database,
        &["ACCDB", "DB", "DBF", "MDB", "SQLITE", "SQLITE3"],
    ),
    (
        Category::Developer,
        &[
            "ASM", "C", "CC", "CPP", "CS", "CSS", "CXX", "DART", "ERL", "EX", "EXS", "GO", "H",
            "HPP", "HS", "HTM", "HTML", "IPYNB", "JAVA", "JS", "JSON", "JSX", "KT", "LUA", "M",
            "PHP", "PL", "PY", "R", "RB", "RS", "SCALA", "SCSS", "SQL", "SWIFT", "TOML", "TS",
            "TSX", "VUE", "XML", "YAML", "YML",
        ],
    ),
    (
        Category::Document,
        &[
            "DOC", "DOCM", "DOCX", "DOT", "DOTX", "LOG", "MD", "ODT", "PAGES", "PDF", "RST",
            "RTF", "TEX", "TXT", "WPD", "WPS",
        ],
    ),
    (
        Category::Ebook,
        &["AZW", "AZW3", "CBR", "CBZ", "DJVU", "EPUB", "FB2", "IBOOKS", "MOBI"],
    ),
    (
        Category::Executable,
        &[
            "APP", "BAT", "BIN", "CMD", "COM", "EXE", "JAR", "OUT", "PS1", "RUN", "SH",
        ],
    ),
    (
        Category::Font,
        &["EOT", "FNT", "FON", "OTF", "TTC", "TTF", "WOFF", "WOFF2"],
    ),
    (
        Category::Image,
        &[
            "AI", "BMP", "CR2", "DNG", "EPS", "GIF", "HEIC", "HEIF", "ICO", "JPEG", "JPG", "NEF",
            "PNG", "PSD", "RAW", "SVG", "TIF", "TIFF", "WEBP",
        ],
    ),
    (
        Category::Installer,
        &["APK", "APPX", "DEB", "DMG", "MSI", "MSIX", "PKG", "RPM", "SNAP", "XAPK"],
    ),
    (
        Category::Presentation,
        &["KEY", "ODP", "POT", "POTX", "PPS", "PPSX", "PPT", "PPTM", "PPTX"],
    ),
    (
        Category::Spreadsheet,
        &["CSV", "NUMBERS", "ODS", "TSV", "XLR", "XLS", "XLSB", "XLSM", "XLSX"],
    ),
    (
        Category::Video,
        &[
            "3GP", "AVI", "FLV", "M2TS", "M4V", "MKV", "MOV", "MP4", "MPEG", "MPG", "MTS", "OGV",
            "VOB", "WEBM", "WMV",
        ],
    ),
];

/// The uppercase extensions mapped to `category`.
///
/// Reserved categories map to nothing.
///
/// # Examples
///
/// ```
/// use sorter::classify::extensions_for;
/// use sorter::Category;
///
/// assert!(extensions_for(Category::Document).contains(&"PDF"));
/// assert!(extensions_for(Category::Undefined).is_empty());
/// ```
#[must_use]
pub fn extensions_for(category: Category) -> &'static [&'static str] {
    EXTENSION_TABLE
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, exts)| *exts)
        .unwrap_or_default()
}

/// True if `extension` (any case, no dot) appears in the table.
#[must_use]
pub fn is_known_extension(extension: &str) -> bool {
    super::Classifier::new().category_of(extension) != Category::Undefined
}
