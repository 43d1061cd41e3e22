//! Error types for pdfreflow library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or reflowing PDF text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The input exceeds the configured size limit.
    #[error("File is too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A text fragment lacks a usable position.
    #[error("Invalid fragment {index} on page {page}: {reason}")]
    InvalidFragment {
        /// Page number (1-indexed)
        page: u32,
        /// Fragment index within the page (0-indexed)
        index: usize,
        /// What is wrong with the fragment
        reason: String,
    },

    /// Malformed text-content JSON.
    #[error("Text content error: {0}")]
    TextContent(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Attach a page number to an [`Error::InvalidFragment`].
    ///
    /// Fragments do not know which page they belong to, so position errors
    /// are raised with page 0 and tagged by the caller that owns the page.
    pub fn on_page(self, page_number: u32) -> Self {
        match self {
            Error::InvalidFragment { index, reason, .. } => Error::InvalidFragment {
                page: page_number,
                index,
                reason,
            },
            other => other,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::TextContent(err.to_string())
    }
}
