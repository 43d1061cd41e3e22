//! Markdown rendering: reflowed pages with optional frontmatter.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::{Document, Page};
use crate::reflow::{ReflowStats, Reflower};

use super::{RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    MarkdownRenderer::new(options.clone()).render_with_stats(doc)
}

/// File name offered for a converted document: the input's file name with a
/// trailing `.pdf` (any case) replaced by `.md`.
///
/// ```
/// use std::path::Path;
/// use pdfreflow::render::output_file_name;
///
/// assert_eq!(output_file_name(Path::new("docs/report.pdf")), Path::new("report.md"));
/// ```
pub fn output_file_name(input: &Path) -> PathBuf {
    let name = match input.file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => return PathBuf::from("converted.md"),
    };

    let stem = if name.to_ascii_lowercase().ends_with(".pdf") {
        &name[..name.len() - 4]
    } else {
        name.as_str()
    };
    PathBuf::from(format!("{}.md", stem))
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        self.render_internal(doc).map(|(content, _)| content)
    }

    /// Render a document to Markdown with reflow statistics.
    pub fn render_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        let (content, stats) = self.render_internal(doc)?;
        Ok(RenderResult::new(content, doc.metadata.clone(), stats))
    }

    fn render_internal(&self, doc: &Document) -> Result<(String, ReflowStats)> {
        let selected: Vec<Page> = doc
            .pages
            .iter()
            .filter(|page| self.options.page_selection.includes(page.number))
            .cloned()
            .collect();

        let reflower = Reflower::new(self.options.reflow.clone());
        let (body, stats) = reflower.reflow_document_with_stats(&selected)?;

        let mut output = String::new();
        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
            output.push('\n');
        }
        output.push_str(&body);

        Ok((output, stats))
    }
}
