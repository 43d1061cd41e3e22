//! Reflow options and thresholds.

use crate::parser::ErrorMode;

/// Distances, in PDF user-space units, that drive break and space insertion.
///
/// The defaults are fixed constants. They are not scaled by font size or
/// page resolution, so heavily scaled documents may need different values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Baseline shift above which a newline is emitted
    pub line_break: f64,
    /// Baseline shift above which a blank line is emitted
    pub paragraph_break: f64,
    /// Horizontal gap above which a space is emitted
    pub word_gap: f64,
}

impl Thresholds {
    /// Baseline shift that starts a new line.
    pub const LINE_BREAK: f64 = 5.0;
    /// Baseline shift that starts a new paragraph.
    pub const PARAGRAPH_BREAK: f64 = 15.0;
    /// Horizontal gap that separates words.
    pub const WORD_GAP: f64 = 20.0;

    /// Set the line break threshold.
    pub fn with_line_break(mut self, value: f64) -> Self {
        self.line_break = value;
        self
    }

    /// Set the paragraph break threshold.
    pub fn with_paragraph_break(mut self, value: f64) -> Self {
        self.paragraph_break = value;
        self
    }

    /// Set the word gap threshold.
    pub fn with_word_gap(mut self, value: f64) -> Self {
        self.word_gap = value;
        self
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            line_break: Self::LINE_BREAK,
            paragraph_break: Self::PARAGRAPH_BREAK,
            word_gap: Self::WORD_GAP,
        }
    }
}

/// Options for reflowing pages.
#[derive(Debug, Clone)]
pub struct ReflowOptions {
    /// Break and gap thresholds
    pub thresholds: Thresholds,

    /// What to do with fragments that have no usable position
    pub error_mode: ErrorMode,

    /// Reflow pages on the rayon thread pool
    pub parallel: bool,

    /// Wrap bold runs in `**`. Bold runs are still tracked when off.
    pub bold_markers: bool,
}

impl Default for ReflowOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            error_mode: ErrorMode::default(),
            parallel: false,
            bold_markers: true,
        }
    }
}

impl ReflowOptions {
    /// Create new reflow options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip invalid fragments instead of failing the page.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel page processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable or disable `**` emphasis markers.
    pub fn with_bold_markers(mut self, bold_markers: bool) -> Self {
        self.bold_markers = bold_markers;
        self
    }
}
