//! Import of pdf.js `getTextContent()` dumps.
//!
//! Accepts a JSON array with one entry per page. Each entry is either the
//! object pdf.js returns (`{"items": [...], "styles": {...}}`) or a bare
//! array of items. Marked-content items (those without a `str` field) are
//! dropped. The document shape written by [`to_json`](crate::render::to_json)
//! (`{"metadata": {...}, "pages": [...]}`) is accepted as well.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Page, TextFragment};

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentInput {
    Pages(Vec<PageInput>),
    Document {
        #[serde(default)]
        metadata: Metadata,
        pages: Vec<PageInput>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageInput {
    Content {
        #[serde(default)]
        number: Option<u32>,
        items: Vec<Value>,
    },
    Items(Vec<Value>),
}

/// Parse a text-content dump into a document.
///
/// Pages keep an explicit `number` when one is given and are otherwise
/// numbered from 1 by position.
///
/// # Example
///
/// ```
/// let json = r#"[{"items": [{"str": "Hi", "transform": [1, 0, 0, 1, 0, 100]}]}]"#;
/// let doc = pdfreflow::parser::parse_text_content(json).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// assert_eq!(doc.pages[0].fragments[0].text, "Hi");
/// ```
pub fn parse_text_content(json: &str) -> Result<Document> {
    let (metadata, inputs) = match serde_json::from_str(json)? {
        ContentInput::Pages(pages) => (None, pages),
        ContentInput::Document { metadata, pages } => (Some(metadata), pages),
    };

    let mut pages = Vec::with_capacity(inputs.len());
    for (idx, input) in inputs.into_iter().enumerate() {
        let position = idx as u32 + 1;
        let (number, items) = match input {
            PageInput::Content { number, items } => (number.unwrap_or(position), items),
            PageInput::Items(items) => (position, items),
        };
        pages.push(Page::with_fragments(number, parse_items(number, items)?));
    }

    log::debug!("Imported {} pages of text content", pages.len());
    let mut document = Document::from_pages(pages);
    if let Some(metadata) = metadata {
        document.metadata = metadata;
    }
    Ok(document)
}

fn parse_items(page: u32, items: Vec<Value>) -> Result<Vec<TextFragment>> {
    let mut fragments = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if item.get("str").is_none() {
            continue;
        }
        let fragment: TextFragment = serde_json::from_value(item).map_err(|e| {
            Error::TextContent(format!("page {}, item {}: {}", page, index, e))
        })?;
        fragments.push(fragment);
    }
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pdfjs_shape() {
        let json = r#"[
            {
                "items": [
                    {"str": "Hello", "dir": "ltr", "width": 30, "height": 12,
                     "transform": [12, 0, 0, 12, 0, 100], "fontName": "g_d0_f1", "hasEOL": false},
                    {"type": "beginMarkedContent", "tag": "P"},
                    {"str": "World", "transform": [12, 0, 0, 12, 35, 100], "fontName": "g_d0_f1"}
                ],
                "styles": {"g_d0_f1": {"fontFamily": "sans-serif"}}
            },
            {"items": []}
        ]"#;

        let doc = parse_text_content(json).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].number, 1);
        assert_eq!(doc.pages[0].fragment_count(), 2);
        assert_eq!(doc.pages[0].fragments[1].text, "World");
        assert!(doc.pages[1].is_empty());
        assert_eq!(doc.pages[1].number, 2);
    }

    #[test]
    fn test_parse_bare_item_arrays() {
        let json = r#"[[{"str": "a", "transform": [1, 0, 0, 1, 0, 0], "fontWeight": 700}]]"#;
        let doc = parse_text_content(json).unwrap();
        assert_eq!(doc.pages[0].fragments[0].font_weight, Some(700.0));
        assert!(doc.pages[0].fragments[0].is_bold());
    }

    #[test]
    fn test_missing_transform_is_kept_for_reflow_to_judge() {
        let json = r#"[[{"str": "a"}]]"#;
        let doc = parse_text_content(json).unwrap();
        assert!(doc.pages[0].fragments[0].transform.is_empty());
    }

    #[test]
    fn test_bad_item_reports_location() {
        let json = r#"[[{"str": "a", "transform": [1, 0, 0, 1, 0, 0]}, {"str": 5}]]"#;
        let err = parse_text_content(json).unwrap_err();
        match err {
            Error::TextContent(msg) => assert!(msg.contains("page 1, item 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_document_shape_keeps_numbers() {
        let json = r#"{
            "metadata": {"title": "Dump", "pdf_version": "1.7", "page_count": 9},
            "pages": [{"number": 4, "items": [{"str": "x", "transform": [1, 0, 0, 1, 0, 0]}]}]
        }"#;
        let doc = parse_text_content(json).unwrap();
        assert_eq!(doc.pages[0].number, 4);
        assert_eq!(doc.metadata.title.as_deref(), Some("Dump"));
        assert_eq!(doc.metadata.page_count, 9);
        assert!(doc.get_page(4).is_some());
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            parse_text_content(r#"{"items": []}"#),
            Err(Error::TextContent(_))
        ));
    }
}
