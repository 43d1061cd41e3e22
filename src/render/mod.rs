//! Rendering module for converting documents to output formats.

mod html;
mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use html::{markdown_to_html, to_html};
pub use json::{pages_to_json, to_json, JsonFormat};
pub use markdown::{output_file_name, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{PageSelection, RenderOptions};
pub use result::RenderResult;
pub use text::to_text;
