//! Counters collected while reflowing.

use serde::{Deserialize, Serialize};

/// Statistics collected during reflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflowStats {
    /// Number of pages reflowed
    pub page_count: u32,

    /// Number of fragments emitted
    pub fragment_count: u32,

    /// Number of fragments skipped for lack of a position
    pub skipped_fragments: u32,

    /// Single newlines inserted
    pub line_breaks: u32,

    /// Blank lines inserted
    pub paragraph_breaks: u32,

    /// Spaces inserted for horizontal gaps
    pub spaces: u32,

    /// Bold runs opened
    pub bold_runs: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ReflowStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReflowStats) {
        self.page_count += other.page_count;
        self.fragment_count += other.fragment_count;
        self.skipped_fragments += other.skipped_fragments;
        self.line_breaks += other.line_breaks;
        self.paragraph_breaks += other.paragraph_breaks;
        self.spaces += other.spaces;
        self.bold_runs += other.bold_runs;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
