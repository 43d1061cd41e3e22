//! JSON rendering of extracted fragments.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
///
/// Pages serialize their fragments under `items` with pdf.js field names, so
/// the output can be fed back through
/// [`parse_text_content`](crate::parser::parse_text_content) via
/// [`pages_to_json`].
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize only the pages, in the text-content import shape.
pub fn pages_to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc.pages),
        JsonFormat::Compact => serde_json::to_string(&doc.pages),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
