//! Parsing options and configuration.

use crate::detect::DEFAULT_MAX_FILE_SIZE;
use crate::render::PageSelection;

/// Options for extracting fragments from PDF documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to parse)
    pub pages: PageSelection,

    /// Largest accepted input in bytes (0 = unlimited)
    pub max_file_size: u64,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip pages whose content cannot be decoded).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set the size limit in bytes (0 = unlimited).
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Error handling mode for extraction and reflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid content and continue
    Lenient,
}
