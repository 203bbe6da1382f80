/// Core domain types for casefix: references, resolutions, and corrections.
use std::ops::Range;
use std::path::PathBuf;

/// A `src`/`href` attribute occurrence found by the scanner.
/// The span always lies on UTF-8 boundaries of the scanned content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Attribute name exactly as written (`src`, `HREF`, ...).
    pub attribute: String,
    /// Byte range of the value text, quotes excluded.
    pub span: Range<usize>,
    /// Attribute value exactly as written.
    pub value: String,
}

/// Outcome of a case-insensitive lookup of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedPath {
    /// The entry exists on disk under this exact path.
    Found(PathBuf),
    /// No entry matched, or the parent directory could not be listed.
    NotFound,
}

/// One attribute value that was rewritten in a document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Correction {
    /// Attribute name exactly as written.
    pub attribute: String,
    /// Value after correction.
    pub corrected: String,
    /// Value as it appeared in the document.
    pub original: String,
    /// Byte range of the original value in the unmodified document.
    #[serde(skip)]
    pub span: Range<usize>,
}

/// How recorded corrections are applied to the document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReplaceStrategy {
    /// Replace every occurrence of each original value anywhere in the document.
    Literal,
    /// Replace only the attribute value spans reported by the scanner.
    #[default]
    Span,
}
