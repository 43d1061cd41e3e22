//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A PDF document reduced to positioned text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let mut doc = Self::new();
        doc.metadata.page_count = pages.len() as u32;
        doc.pages = pages;
        doc
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.number == page_num)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of fragments across all pages.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(Page::fragment_count).sum()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7"); empty for text-content imports
    #[serde(default)]
    pub pdf_version: String,

    /// Total number of pages in the source, selected or not
    #[serde(default)]
    pub page_count: u32,

    /// Whether the document is encrypted
    #[serde(default)]
    pub encrypted: bool,
}

impl Metadata {
    /// Create new metadata with PDF version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        let fields = [
            ("title", &self.title),
            ("author", &self.author),
            ("subject", &self.subject),
            ("keywords", &self.keywords),
            ("creator", &self.creator),
            ("producer", &self.producer),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                lines.push(format!("{}: \"{}\"", key, escape_yaml(value)));
            }
        }

        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }
        if let Some(ref modified) = self.modified {
            lines.push(format!("modified: {}", modified.to_rfc3339()));
        }

        if !self.pdf_version.is_empty() {
            lines.push(format!("pdf_version: \"{}\"", self.pdf_version));
        }
        lines.push(format!("pages: {}", self.page_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextFragment;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.fragment_count(), 0);
    }

    #[test]
    fn test_document_get_page_by_number() {
        let doc = Document::from_pages(vec![
            Page::with_fragments(3, vec![TextFragment::new("a", 0.0, 0.0)]),
            Page::new(7),
        ]);
        assert_eq!(doc.metadata.page_count, 2);
        assert_eq!(doc.get_page(3).map(|p| p.fragment_count()), Some(1));
        assert!(doc.get_page(7).is_some());
        assert!(doc.get_page(1).is_none());
        assert_eq!(doc.fragment_count(), 1);
    }

    #[test]
    fn test_metadata_frontmatter() {
        let mut metadata = Metadata::with_version("1.7");
        metadata.title = Some("Test \"Document\"".to_string());
        metadata.author = Some("Jane Doe".to_string());
        metadata.page_count = 10;

        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("title: \"Test \\\"Document\\\"\""));
        assert!(yaml.contains("author: \"Jane Doe\""));
        assert!(yaml.contains("pdf_version: \"1.7\""));
        assert!(yaml.contains("pages: 10"));
        assert!(yaml.ends_with("---\n"));
    }

    #[test]
    fn test_metadata_frontmatter_without_version() {
        let yaml = Metadata::default().to_yaml_frontmatter();
        assert!(!yaml.contains("pdf_version"));
        assert!(yaml.contains("pages: 0"));
    }
}
