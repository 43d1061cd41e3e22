//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};
use crate::reflow::{ReflowOptions, Thresholds};

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Page selection
    pub page_selection: PageSelection,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Reflow engine configuration
    pub reflow: ReflowOptions,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set reflow options.
    pub fn with_reflow(mut self, reflow: ReflowOptions) -> Self {
        self.reflow = reflow;
        self
    }

    /// Set reflow thresholds.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.reflow.thresholds = thresholds;
        self
    }
}

/// Page selection for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Render all pages
    #[default]
    All,
    /// Render a range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Render specific pages (1-indexed)
    Pages(Vec<u32>),
    /// Render several ranges (sorted, non-overlapping, 1-indexed)
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|range| range.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start = parse_page_number(start)?;
                let end = parse_page_number(end)?;
                if start > end {
                    return Err(Error::InvalidPageRange(part.to_string()));
                }
                ranges.push(start..=end);
            } else {
                let page = parse_page_number(part)?;
                ranges.push(page..=page);
            }
        }

        Ok(PageSelection::Ranges(merge_ranges(ranges)))
    }
}

/// Sort ranges and merge the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                if range.end() > last.end() {
                    *last = *last.start()..=*range.end();
                }
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_page_number(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(s.trim().to_string())),
        Ok(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_page_range(2..=4)
            .with_thresholds(Thresholds::default().with_paragraph_break(30.0));

        assert!(options.include_frontmatter);
        assert_eq!(options.page_selection, PageSelection::Range(2..=4));
        assert_eq!(options.reflow.thresholds.paragraph_break, 30.0);
    }

    #[test]
    fn test_page_selection_includes() {
        let all = PageSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5, 7]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
        assert!(pages.includes(3));

        let ranges = PageSelection::Ranges(vec![1..=1, 4..=6]);
        assert!(ranges.includes(1));
        assert!(!ranges.includes(3));
        assert!(ranges.includes(6));
        assert!(!ranges.includes(7));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("1-10").unwrap(), PageSelection::Range(1..=10));
        assert_eq!(
            PageSelection::parse("10,1,3,5-7,3").unwrap(),
            PageSelection::Ranges(vec![1..=1, 3..=3, 5..=7, 10..=10])
        );
        assert_eq!(
            PageSelection::parse("4-6,2,3,5-9").unwrap(),
            PageSelection::Ranges(vec![2..=9])
        );
    }

    #[test]
    fn test_page_selection_parse_huge_range_in_list() {
        let selection = PageSelection::parse("1,1-4294967295").unwrap();
        assert_eq!(selection, PageSelection::Ranges(vec![1..=u32::MAX]));
        assert!(selection.includes(u32::MAX));
    }

    #[test]
    fn test_page_selection_parse_errors() {
        assert!(matches!(
            PageSelection::parse("abc"),
            Err(Error::InvalidPageRange(_))
        ));
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-2").is_err());
        assert!(matches!(
            PageSelection::parse("5-3,7"),
            Err(Error::InvalidPageRange(part)) if part == "5-3"
        ));
    }
}
