//! Document model types for positioned PDF text.
//!
//! The model is the boundary between fragment extraction (from a PDF or a
//! pdf.js text-content dump) and reflow/rendering.

mod document;
mod fragment;
mod page;

pub use document::{Document, Metadata};
pub use fragment::{TextFragment, BOLD_WEIGHT, TRANSFORM_LEN};
pub use page::Page;
