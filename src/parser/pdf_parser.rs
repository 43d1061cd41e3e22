//! PDF fragment extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::{validate_bytes, validate_file};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Page, TextFragment};

use super::content::{decode_text_simple, ContentInterpreter};
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        validate_file(path, options.max_file_size)?;

        let doc = LopdfDocument::load(path)?;
        log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());

        Ok(Self { doc, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        validate_bytes(data, options.max_file_size)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Extract every selected page's fragments.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();
        document.metadata = self.extract_metadata();

        let page_ids = self.doc.get_pages();
        document.metadata.page_count = page_ids.len() as u32;

        for (&page_num, &page_id) in page_ids.iter() {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            let fragments = match self.extract_page_fragments(page_id) {
                Ok(fragments) => fragments,
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    Vec::new()
                }
            };

            log::debug!("Page {}: {} fragments", page_num, fragments.len());
            document.add_page(Page::with_fragments(page_num, fragments));
        }

        Ok(document)
    }

    /// Extract one page's fragments (1-indexed page number).
    pub fn parse_page(&self, page_num: u32) -> Result<Page> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, pages.len() as u32))?;
        let fragments = self.extract_page_fragments(*page_id)?;
        Ok(Page::with_fragments(page_num, fragments))
    }

    /// Number of pages in the file.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn extract_page_fragments(&self, page_id: ObjectId) -> Result<Vec<TextFragment>> {
        let font_dicts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let content = self.get_page_content(page_id)?;
        ContentInterpreter::new(&self.doc, font_dicts).run(&content)
    }

    /// Get page content stream, concatenating arrays of streams.
    fn get_page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without Contents is blank.
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => s
                    .decompressed_content()
                    .or_else(|_| Ok(s.content.clone())),
                Object::Array(arr) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    match s.decompressed_content() {
                        Ok(data) => content.extend_from_slice(&data),
                        Err(_) => content.extend_from_slice(&s.content),
                    }
                    content.push(b' ');
                }
            }
        }
        content
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());

        let info_dict = self
            .doc
            .trailer
            .get(b"Info")
            .ok()
            .and_then(|info| info.as_reference().ok())
            .and_then(|info_ref| self.doc.get_dictionary(info_ref).ok());

        if let Some(info_dict) = info_dict {
            metadata.title = get_string_from_dict(info_dict, b"Title");
            metadata.author = get_string_from_dict(info_dict, b"Author");
            metadata.subject = get_string_from_dict(info_dict, b"Subject");
            metadata.keywords = get_string_from_dict(info_dict, b"Keywords");
            metadata.creator = get_string_from_dict(info_dict, b"Creator");
            metadata.producer = get_string_from_dict(info_dict, b"Producer");
            metadata.created =
                get_string_from_dict(info_dict, b"CreationDate").and_then(|d| parse_pdf_date(&d));
            metadata.modified =
                get_string_from_dict(info_dict, b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        metadata.encrypted = self.doc.is_encrypted();
        metadata
    }
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
