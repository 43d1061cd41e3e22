//! Fragment extraction: from PDF files through lopdf, or from pdf.js
//! text-content dumps.

mod content;
mod fonts;
mod options;
mod pdf_parser;
mod text_content;

pub use content::{multiply, ContentInterpreter, Matrix, IDENTITY};
pub use fonts::{FontInfo, DEFAULT_GLYPH_WIDTH};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
pub use text_content::parse_text_content;
