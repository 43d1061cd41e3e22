//! End-to-end tests for the pdfreflow binary.

use std::fs;
use std::process::Command;

const DUMP: &str = r#"[
    {"items": [
        {"str": "Summary", "fontName": "Helvetica-Bold", "width": 40,
         "transform": [12, 0, 0, 12, 72, 700]},
        {"str": "First line", "fontName": "Helvetica", "width": 50,
         "transform": [12, 0, 0, 12, 72, 670]},
        {"str": "continued", "fontName": "Helvetica",
         "transform": [12, 0, 0, 12, 150, 670]}
    ]},
    {"items": [{"str": "Page two", "transform": [12, 0, 0, 12, 72, 700]}]}
]"#;

fn pdfreflow() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pdfreflow"))
}

#[test]
fn test_reflow_json_to_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.json");
    let output = dir.path().join("out.md");
    fs::write(&input, DUMP).unwrap();

    let status = pdfreflow()
        .arg("reflow")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .env_remove("PDFREFLOW_WORD_GAP")
        .status()
        .unwrap();
    assert!(status.success());

    let markdown = fs::read_to_string(&output).unwrap();
    assert_eq!(
        markdown,
        "**Summary\n\n**First line continued\n\nPage two"
    );
}

#[test]
fn test_reflow_json_to_text_with_threshold_override() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.json");
    let output = dir.path().join("out.txt");
    fs::write(&input, DUMP).unwrap();

    let status = pdfreflow()
        .args(["reflow", "--text", "--word-gap", "100"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());

    let text = fs::read_to_string(&output).unwrap();
    assert_eq!(text, "Summary\n\nFirst linecontinued\n\nPage two");
}

#[test]
fn test_reflow_json_to_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.json");
    fs::write(
        &input,
        r#"[[{"str": "Total:", "fontName": "Helvetica-Bold", "width": 30,
              "transform": [12, 0, 0, 12, 72, 700]},
             {"str": " 2**10", "transform": [12, 0, 0, 12, 104, 700]}]]"#,
    )
    .unwrap();

    let output = pdfreflow()
        .args(["reflow", "--html"])
        .arg(&input)
        .env_remove("PDFREFLOW_WORD_GAP")
        .output()
        .unwrap();
    assert!(output.status.success());

    let html = String::from_utf8(output.stdout).unwrap();
    assert!(html.starts_with("<p><strong>Total:</strong> 2"));
}

#[test]
fn test_reflow_text_keeps_literal_asterisks() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.json");
    fs::write(
        &input,
        r#"[[{"str": "2**10 = 1024", "transform": [12, 0, 0, 12, 72, 700]}]]"#,
    )
    .unwrap();

    let output = pdfreflow()
        .args(["reflow", "--text"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2**10 = 1024\n");
}

#[test]
fn test_inverted_range_in_page_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = pdfreflow()
        .args(["markdown", "--pages", "5-3,7"])
        .arg(dir.path().join("missing.pdf"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid page range"));
}

#[test]
fn test_strict_reflow_fails_on_unpositioned_fragment() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(&input, r#"[[{"str": "lost"}]]"#).unwrap();

    let output = pdfreflow()
        .args(["reflow", "--strict"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = pdfreflow()
        .arg("markdown")
        .arg(dir.path().join("missing.pdf"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
