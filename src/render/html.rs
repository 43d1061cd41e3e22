//! HTML preview of the reflowed Markdown.

use pulldown_cmark::{html, Event, Options, Parser};

use crate::error::Result;
use crate::model::Document;

use super::{MarkdownRenderer, RenderOptions};

/// Convert a document to an HTML fragment: the reflowed Markdown, without
/// frontmatter, rendered as CommonMark with tables and strikethrough.
///
/// ```
/// use pdfreflow::model::{Document, Page, TextFragment};
/// use pdfreflow::render::{to_html, RenderOptions};
///
/// let doc = Document::from_pages(vec![Page::with_fragments(
///     1,
///     vec![TextFragment::new("Note:", 72.0, 700.0).with_weight(700.0)],
/// )]);
/// let html = to_html(&doc, &RenderOptions::default()).unwrap();
/// assert_eq!(html, "<p><strong>Note:</strong></p>\n");
/// ```
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let options = options.clone().with_frontmatter(false);
    let markdown = MarkdownRenderer::new(options).render(doc)?;
    Ok(markdown_to_html(&markdown))
}

/// Render Markdown to HTML. Raw HTML in the input is escaped, not passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
