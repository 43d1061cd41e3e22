//! Text reflow: rebuild line breaks, paragraph breaks and bold runs from
//! positioned fragments.
//!
//! The engine makes one pass over a page's fragments in producer order. It
//! never sorts them; it compares each fragment's baseline and left edge with
//! the previous fragment and emits `\n`, `\n\n` or a space accordingly, and
//! wraps bold fragments in `**`.

mod engine;
mod options;
mod stats;

pub use engine::{reflow_document, reflow_page, ReflowState, Reflower, Style, PAGE_SEPARATOR};
pub use options::{ReflowOptions, Thresholds};
pub use stats::ReflowStats;
