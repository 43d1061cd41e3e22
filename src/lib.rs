//! # pdfreflow
//!
//! PDF to Markdown text reflow for Rust.
//!
//! Each page of a PDF is reduced to the positioned text fragments its content
//! stream shows, in stream order. The reflow engine then walks those
//! fragments once and rebuilds readable text: blank lines where the baseline
//! jumps far, newlines where it moves a little, spaces across wide horizontal
//! gaps, and `**bold**` runs where the font is bold.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::{parse_file, render};
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let doc = parse_file("document.pdf")?;
//!
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options)?;
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! Fragments from other producers can be reflowed directly:
//!
//! ```
//! use pdfreflow::model::TextFragment;
//!
//! let fragments = vec![
//!     TextFragment::new("Intro", 72.0, 700.0).with_weight(700.0),
//!     TextFragment::new("Body text.", 72.0, 670.0),
//! ];
//! assert_eq!(pdfreflow::reflow_page(&fragments)?, "**Intro\n\n**Body text.");
//! # Ok::<(), pdfreflow::Error>(())
//! ```

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod reflow;
pub mod render;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{Document, Metadata, Page, TextFragment};
pub use parser::{parse_text_content, ErrorMode, ParseOptions, PdfParser};
pub use reflow::{reflow_document, reflow_page, ReflowOptions, ReflowStats, Reflower, Thresholds};
pub use render::{JsonFormat, PageSelection, RenderOptions, RenderResult};

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into its per-page fragments.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::parse_file;
///
/// let doc = parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{parse_file_with_options, PageSelection, ParseOptions};
///
/// let options = ParseOptions::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=3));
/// let doc = parse_file_with_options("document.pdf", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = PdfParser::from_bytes(data)?;
    parser.parse()
}

/// Parse a PDF from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse a PDF from a reader.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("document.pdf").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = PdfParser::from_reader(reader)?;
    parser.parse()
}

/// Extract reflowed plain text from a PDF file.
///
/// # Example
///
/// ```no_run
/// let text = pdfreflow::extract_text("document.pdf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, &RenderOptions::default())
}

/// Convert a PDF to Markdown.
///
/// # Example
///
/// ```no_run
/// let markdown = pdfreflow::to_markdown("document.pdf").unwrap();
/// std::fs::write("document.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, &RenderOptions::default())
}

/// Convert a PDF to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{to_markdown_with_options, RenderOptions};
///
/// let options = RenderOptions::new().with_frontmatter(true);
/// let markdown = to_markdown_with_options("document.pdf", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_markdown(&doc, options)
}

/// Dump a PDF's extracted fragments as JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and reflowing PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{Pdfreflow, Thresholds};
///
/// let markdown = Pdfreflow::new()
///     .lenient()
///     .with_frontmatter()
///     .with_thresholds(Thresholds::default().with_word_gap(12.0))
///     .parse("document.pdf")?
///     .to_markdown()?;
/// # Ok::<(), pdfreflow::Error>(())
/// ```
pub struct Pdfreflow {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Pdfreflow {
    /// Create a new builder. Pages are reflowed in parallel by default.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default()
                .with_reflow(ReflowOptions::default().with_parallel(true)),
        }
    }

    /// Skip undecodable pages and unpositioned fragments instead of failing.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self.render_options.reflow = self.render_options.reflow.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.render_options.reflow = self.render_options.reflow.with_parallel(false);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.parse_options = self.parse_options.with_pages(pages.clone());
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Enable frontmatter in output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Override the reflow thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.render_options = self.render_options.with_thresholds(thresholds);
        self
    }

    /// Set the maximum accepted input size in bytes (0 for no limit).
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.parse_options = self.parse_options.with_max_file_size(bytes);
        self
    }

    /// Parse a PDF file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<PdfreflowResult> {
        let parser = PdfParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(PdfreflowResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse a PDF from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<PdfreflowResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(PdfreflowResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Wrap an already extracted document, e.g. from [`parse_text_content`].
    pub fn load(self, document: Document) -> PdfreflowResult {
        PdfreflowResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Pdfreflow {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed document together with the options to render it.
pub struct PdfreflowResult {
    /// The parsed document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl PdfreflowResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to Markdown and collect reflow statistics.
    pub fn to_markdown_with_stats(&self) -> Result<RenderResult> {
        render::to_markdown_with_stats(&self.document, &self.render_options)
    }

    /// Render the Markdown as an HTML preview.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Dump the fragments as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
