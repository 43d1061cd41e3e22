//! PDF format detection and upload validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Largest input accepted by default (50 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Detect PDF format from a file path.
///
/// # Example
/// ```no_run
/// use pdfreflow::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 16];
    let read = reader.read(&mut header)?;
    detect_format_from_bytes(&header[..read])
}

/// Detect PDF format from bytes.
///
/// `data` must hold at least the first 8 bytes of the file.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if a file is a valid PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a valid PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Validate a file before parsing: size limit first, then the PDF header.
///
/// A `max_size` of 0 disables the size check.
pub fn validate_file<P: AsRef<Path>>(path: P, max_size: u64) -> Result<PdfFormat> {
    let path = path.as_ref();
    let size = std::fs::metadata(path)?.len();
    check_size(size, max_size)?;
    detect_format_from_path(path)
}

/// Validate an in-memory PDF: size limit first, then the PDF header.
pub fn validate_bytes(data: &[u8], max_size: u64) -> Result<PdfFormat> {
    check_size(data.len() as u64, max_size)?;
    detect_format_from_bytes(data)
}

fn check_size(size: u64, limit: u64) -> Result<()> {
    if limit > 0 && size > limit {
        log::warn!("Rejecting input of {} bytes (limit {})", size, limit);
        return Err(Error::FileTooLarge { size, limit });
    }
    Ok(())
}
