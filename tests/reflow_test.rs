//! Integration tests for the reflow engine.

use pdfreflow::model::{Page, TextFragment};
use pdfreflow::{reflow_document, reflow_page, Error, ReflowOptions, Reflower};

fn frag(text: &str, x: f64, y: f64) -> TextFragment {
    TextFragment::new(text, x, y)
}

/// A page of body text: a bold heading, wrapped lines, then a second paragraph.
fn article_page(number: u32) -> Page {
    let top = 760.0 - number as f64;
    let mut fragments = vec![TextFragment::new(format!("Section {}", number), 72.0, top)
        .with_font("ABCDEF+Georgia-Bold")
        .with_width(80.0)];
    for line in 0..4 {
        let y = top - 30.0 - 14.0 * line as f64;
        fragments.push(frag("Lorem ipsum dolor", 72.0, y).with_width(120.0));
        fragments.push(frag("sit amet", 222.0, y).with_width(50.0));
        fragments.push(frag("consectetur", 275.0, y).with_width(70.0));
    }
    fragments.push(frag("Closing paragraph.", 72.0, top - 140.0));
    Page::with_fragments(number, fragments)
}

#[test]
fn test_empty_input_is_empty_string() {
    assert_eq!(reflow_page(&[]).unwrap(), "");
}

#[test]
fn test_lone_bold_fragment_is_closed() {
    let fragment = TextFragment::with_transform("Hi", vec![1.0, 0.0, 0.0, 1.0, 0.0, 100.0])
        .with_font("Arial-Bold");
    assert_eq!(reflow_page(&[fragment]).unwrap(), "**Hi**");
}

#[test]
fn test_small_and_large_horizontal_gaps() {
    let near = [
        frag("Hello", 0.0, 100.0).with_width(30.0),
        frag("World", 35.0, 100.0),
    ];
    assert_eq!(reflow_page(&near).unwrap(), "HelloWorld");

    let far = [
        frag("Hello", 0.0, 100.0).with_width(30.0),
        frag("World", 55.0, 100.0),
    ];
    assert_eq!(reflow_page(&far).unwrap(), "Hello World");
}

#[test]
fn test_vertical_jumps() {
    let six = [frag("a", 0.0, 100.0), frag("b", 0.0, 106.0)];
    assert_eq!(reflow_page(&six).unwrap(), "a\nb");

    let seventeen = [frag("a", 0.0, 100.0), frag("b", 0.0, 117.0)];
    assert_eq!(reflow_page(&seventeen).unwrap(), "a\n\nb");

    let sixteen = [frag("a", 0.0, 100.0), frag("b", 0.0, 116.0)];
    assert_eq!(reflow_page(&sixteen).unwrap(), "a\n\nb");
}

#[test]
fn test_repeated_bold_emits_one_pair_of_markers() {
    let bold = |text: &str| frag(text, 0.0, 100.0).with_weight(800.0);

    let then_plain = [bold("a"), bold("b"), bold("c"), frag("d", 0.0, 100.0)];
    let out = reflow_page(&then_plain).unwrap();
    assert_eq!(out, "**abc**d");
    assert_eq!(out.matches("**").count(), 2);

    let then_end = [bold("a"), bold("b"), bold("c")];
    assert_eq!(reflow_page(&then_end).unwrap(), "**abc**");
}

#[test]
fn test_document_is_pages_joined_by_blank_line() {
    let pages: Vec<Page> = (1..=5).map(article_page).collect();

    let expected = pages
        .iter()
        .map(|p| reflow_page(&p.fragments).unwrap())
        .collect::<Vec<_>>()
        .join("\n\n");

    assert_eq!(reflow_document(&pages).unwrap(), expected);
    assert_eq!(reflow_document(&[]).unwrap(), "");
}

#[test]
fn test_article_page_layout() {
    let out = reflow_page(&article_page(1).fragments).unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("**Section 1"));
    assert_eq!(lines.next(), Some(""));
    assert_eq!(
        lines.next(),
        Some("**Lorem ipsum dolor sit ametconsectetur")
    );
    assert!(out.ends_with("consectetur\n\nClosing paragraph."));
}

#[test]
fn test_output_is_deterministic() {
    let pages: Vec<Page> = (1..=20).map(article_page).collect();
    let first = reflow_document(&pages).unwrap();
    for _ in 0..5 {
        assert_eq!(reflow_document(&pages).unwrap(), first);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let pages: Vec<Page> = (1..=64).map(article_page).collect();

    let sequential = Reflower::new(ReflowOptions::new())
        .reflow_document_with_stats(&pages)
        .unwrap();
    let parallel = Reflower::new(ReflowOptions::new().with_parallel(true))
        .reflow_document_with_stats(&pages)
        .unwrap();

    assert_eq!(parallel.0, sequential.0);
    assert_eq!(parallel.1, sequential.1);
    assert_eq!(parallel.1.page_count, 64);
}

#[test]
fn test_parallel_reports_first_failing_page() {
    let mut pages: Vec<Page> = (1..=16).map(article_page).collect();
    pages[4].add_fragment(TextFragment::with_transform("x", vec![0.0; 2]));
    pages[11].add_fragment(TextFragment::with_transform("y", vec![0.0; 2]));

    let err = Reflower::new(ReflowOptions::new().with_parallel(true))
        .reflow_document(&pages)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidFragment { page: 5, .. }));
}

#[test]
fn test_lenient_document_skips_bad_fragments() {
    let mut page = article_page(1);
    page.fragments
        .insert(1, TextFragment::with_transform("ghost", vec![1.0, 0.0, 0.0, 1.0, f64::INFINITY, 0.0]));

    let reflower = Reflower::new(ReflowOptions::new().lenient());
    let (text, stats) = reflower.reflow_document_with_stats(&[page]).unwrap();

    assert!(!text.contains("ghost"));
    assert_eq!(text, reflow_page(&article_page(1).fragments).unwrap());
    assert_eq!(stats.skipped_fragments, 1);
}
