//! Page-level types.

use super::TextFragment;
use serde::{Deserialize, Serialize};

/// A single page: its text fragments in content-stream order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Fragments as the producer emitted them. Never reordered.
    #[serde(rename = "items")]
    pub fragments: Vec<TextFragment>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Create a page from fragments.
    pub fn with_fragments(number: u32, fragments: Vec<TextFragment>) -> Self {
        Self { number, fragments }
    }

    /// Append a fragment.
    pub fn add_fragment(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Get the number of fragments on the page.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Concatenated fragment text with no layout reconstruction.
    pub fn raw_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}
