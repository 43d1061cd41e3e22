//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use crate::reflow::ReflowStats;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Reflow statistics
    pub stats: ReflowStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: ReflowStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Create a simple result with just content.
    pub fn content_only(content: String) -> Self {
        Self {
            content,
            metadata: Metadata::default(),
            stats: ReflowStats::default(),
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_result_content_only() {
        let result = RenderResult::content_only("**Hello**".to_string());
        assert_eq!(result.content, "**Hello**");
        assert_eq!(result.content_len(), 9);
        assert_eq!(result.stats, ReflowStats::default());
    }
}
