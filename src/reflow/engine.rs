//! Single-pass text reflow over producer-ordered fragments.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Page, TextFragment};
use crate::parser::ErrorMode;

use super::{ReflowOptions, ReflowStats, Thresholds};

/// Bold marker used to open and close emphasis runs.
const BOLD_MARKER: &str = "**";

/// Separator placed between reflowed pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Emphasis state of the text being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Regular text
    #[default]
    None,
    /// Inside a `**` run
    Bold,
}

/// Per-page state threaded through the reflow loop.
///
/// A fresh state is created for every page; nothing carries over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflowState {
    /// Current emphasis
    pub style: Style,
    /// Baseline of the previous fragment
    pub last_baseline_y: Option<f64>,
    /// Right edge (x + width) of the previous fragment
    pub last_right_edge_x: Option<f64>,
    /// Whether a fragment has been emitted yet
    pub started: bool,
    /// Track bold runs without writing `**`
    pub plain: bool,
}

impl ReflowState {
    /// Create the initial state for a page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state that never writes emphasis markers.
    pub fn plain() -> Self {
        Self {
            plain: true,
            ..Self::default()
        }
    }

    fn push_marker(&self, out: &mut String) {
        if !self.plain {
            out.push_str(BOLD_MARKER);
        }
    }

    /// Emit one fragment at `(x, y)` into `out`.
    pub fn push(
        &mut self,
        fragment: &TextFragment,
        (x, y): (f64, f64),
        thresholds: &Thresholds,
        out: &mut String,
        stats: &mut ReflowStats,
    ) {
        let is_bold = fragment.is_bold();
        let dy = self.last_baseline_y.map(|last| (y - last).abs());
        let is_new_line = dy.map(|dy| dy > thresholds.line_break).unwrap_or(false);
        let is_large_gap = self
            .last_right_edge_x
            .map(|last| x - last > thresholds.word_gap)
            .unwrap_or(false);

        if is_new_line {
            out.push('\n');
            if dy.map(|dy| dy > thresholds.paragraph_break).unwrap_or(false) {
                out.push('\n');
                stats.paragraph_breaks += 1;
            } else {
                stats.line_breaks += 1;
            }
        } else if is_large_gap && self.started {
            out.push(' ');
            stats.spaces += 1;
        }

        match (is_bold, self.style) {
            (true, Style::None) => {
                self.push_marker(out);
                self.style = Style::Bold;
                stats.bold_runs += 1;
            }
            (false, Style::Bold) => {
                self.push_marker(out);
                self.style = Style::None;
            }
            _ => {}
        }

        out.push_str(&fragment.text);

        self.last_baseline_y = Some(y);
        self.last_right_edge_x = Some(x + fragment.advance());
        self.started = true;
        stats.fragment_count += 1;
    }

    /// Close any open bold run.
    pub fn finish(&mut self, out: &mut String) {
        if self.style == Style::Bold {
            self.push_marker(out);
            self.style = Style::None;
        }
    }
}

/// Configured reflow engine.
///
/// # Example
///
/// ```
/// use pdfreflow::model::TextFragment;
/// use pdfreflow::reflow::{ReflowOptions, Reflower};
///
/// let fragments = vec![
///     TextFragment::new("Note:", 72.0, 700.0)
///         .with_font("Helvetica-Bold")
///         .with_width(25.0),
///     TextFragment::new(" see below", 100.0, 700.0),
///     TextFragment::new("Next paragraph", 72.0, 680.0),
/// ];
/// let text = Reflower::new(ReflowOptions::default())
///     .reflow_page(&fragments)
///     .unwrap();
/// assert_eq!(text, "**Note:** see below\n\nNext paragraph");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Reflower {
    options: ReflowOptions,
}

impl Reflower {
    /// Create a reflow engine.
    pub fn new(options: ReflowOptions) -> Self {
        Self { options }
    }

    /// Get the options in use.
    pub fn options(&self) -> &ReflowOptions {
        &self.options
    }

    /// Reflow a bare fragment sequence. Errors report it as page 1.
    pub fn reflow_page(&self, fragments: &[TextFragment]) -> Result<String> {
        self.reflow_fragments(1, fragments).map(|(text, _)| text)
    }

    /// Reflow one page and return its counters.
    pub fn reflow_page_with_stats(&self, page: &Page) -> Result<(String, ReflowStats)> {
        self.reflow_fragments(page.number, &page.fragments)
    }

    /// Reflow pages in order and join them with a blank line.
    pub fn reflow_document(&self, pages: &[Page]) -> Result<String> {
        self.reflow_document_with_stats(pages).map(|(text, _)| text)
    }

    /// Reflow pages in order, returning the joined text and merged counters.
    ///
    /// With `parallel` set, pages are reflowed on the rayon pool. Output and
    /// the reported error (the lowest failing page) match the sequential run.
    pub fn reflow_document_with_stats(&self, pages: &[Page]) -> Result<(String, ReflowStats)> {
        let results: Vec<Result<(String, ReflowStats)>> = if self.options.parallel {
            pages
                .par_iter()
                .map(|page| self.reflow_page_with_stats(page))
                .collect()
        } else {
            pages
                .iter()
                .map(|page| self.reflow_page_with_stats(page))
                .collect()
        };

        let mut texts = Vec::with_capacity(results.len());
        let mut stats = ReflowStats::new();
        for result in results {
            let (text, page_stats) = result?;
            stats.merge(&page_stats);
            texts.push(text);
        }

        Ok((texts.join(PAGE_SEPARATOR), stats))
    }

    fn reflow_fragments(
        &self,
        page_number: u32,
        fragments: &[TextFragment],
    ) -> Result<(String, ReflowStats)> {
        let thresholds = &self.options.thresholds;
        let mut out = String::new();
        let mut stats = ReflowStats {
            page_count: 1,
            ..Default::default()
        };
        let mut state = if self.options.bold_markers {
            ReflowState::new()
        } else {
            ReflowState::plain()
        };

        for (index, fragment) in fragments.iter().enumerate() {
            let position = match fragment.position(index) {
                Ok(position) => position,
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(e.on_page(page_number)),
                    ErrorMode::Lenient => {
                        log::warn!("Skipping fragment: {}", e.on_page(page_number));
                        stats.skipped_fragments += 1;
                        continue;
                    }
                },
            };
            state.push(fragment, position, thresholds, &mut out, &mut stats);
        }
        state.finish(&mut out);

        stats.count_text(&out);
        log::debug!(
            "Reflowed page {}: {} fragments, {} skipped, {} bytes",
            page_number,
            stats.fragment_count,
            stats.skipped_fragments,
            out.len()
        );

        Ok((out, stats))
    }
}

/// Reflow one page's fragments with default options.
///
/// # Example
///
/// ```
/// use pdfreflow::model::TextFragment;
///
/// let fragments = vec![
///     TextFragment::new("Hello", 0.0, 100.0).with_width(30.0),
///     TextFragment::new("World", 55.0, 100.0),
/// ];
/// assert_eq!(pdfreflow::reflow_page(&fragments).unwrap(), "Hello World");
/// ```
pub fn reflow_page(fragments: &[TextFragment]) -> Result<String> {
    Reflower::default().reflow_page(fragments)
}

/// Reflow pages with default options, joined by a blank line.
pub fn reflow_document(pages: &[Page]) -> Result<String> {
    Reflower::default().reflow_document(pages)
}
