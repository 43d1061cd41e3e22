//! Plain text rendering for PDF documents.

use crate::error::Result;
use crate::model::Document;

use super::{MarkdownRenderer, RenderOptions};

/// Convert a document to plain text: the reflowed pages without bold markers
/// or frontmatter.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut options = options.clone().with_frontmatter(false);
    options.reflow.bold_markers = false;
    MarkdownRenderer::new(options).render(doc)
}
