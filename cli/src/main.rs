//! pdfreflow CLI - PDF text reflow tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfreflow::render::{self, output_file_name};
use pdfreflow::{
    parse_file_with_options, parse_text_content, Document, ErrorMode, JsonFormat, PageSelection,
    ParseOptions, ReflowOptions, RenderOptions, Thresholds,
};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(about = "Reflow PDF text into Markdown with paragraphs and bold runs", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file or directory (defaults to <stem>.md)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    thresholds: ThresholdArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Reflow threshold overrides, in PDF user-space units.
#[derive(Args)]
struct ThresholdArgs {
    /// Baseline shift that starts a new line
    #[arg(long, global = true, env = "PDFREFLOW_LINE_BREAK", value_name = "UNITS")]
    line_break: Option<f64>,

    /// Baseline shift that starts a new paragraph
    #[arg(long, global = true, env = "PDFREFLOW_PARAGRAPH_BREAK", value_name = "UNITS")]
    paragraph_break: Option<f64>,

    /// Horizontal gap that inserts a space
    #[arg(long, global = true, env = "PDFREFLOW_WORD_GAP", value_name = "UNITS")]
    word_gap: Option<f64>,
}

impl ThresholdArgs {
    fn to_thresholds(&self) -> Thresholds {
        let mut thresholds = Thresholds::default();
        if let Some(value) = self.line_break {
            thresholds = thresholds.with_line_break(value);
        }
        if let Some(value) = self.paragraph_break {
            thresholds = thresholds.with_paragraph_break(value);
        }
        if let Some(value) = self.word_gap {
            thresholds = thresholds.with_word_gap(value);
        }
        thresholds
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert PDF to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Fail on unreadable pages and unpositioned fragments
        #[arg(long)]
        strict: bool,
    },

    /// Convert PDF to plain text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Convert PDF to an HTML preview of the Markdown
    Html {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,
    },

    /// Dump extracted text fragments as JSON
    Fragments {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Reflow a pdf.js text-content JSON dump
    Reflow {
        /// Input JSON file
        #[arg(value_name = "JSON")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit plain text instead of Markdown
        #[arg(long)]
        text: bool,

        /// Emit an HTML preview instead of Markdown
        #[arg(long, conflicts_with = "text")]
        html: bool,

        /// Fail on fragments without a usable position
        #[arg(long)]
        strict: bool,
    },

    /// Show document information and reflow statistics
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let thresholds = cli.thresholds.to_thresholds();
    log::debug!(
        "Thresholds: line break {}, paragraph break {}, word gap {}",
        thresholds.line_break,
        thresholds.paragraph_break,
        thresholds.word_gap
    );

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            pages,
            strict,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            pages.as_deref(),
            strict,
            thresholds,
        ),
        Some(Commands::Text {
            input,
            output,
            pages,
        }) => cmd_text(&input, output.as_deref(), pages.as_deref(), thresholds),
        Some(Commands::Html {
            input,
            output,
            pages,
        }) => cmd_html(&input, output.as_deref(), pages.as_deref(), thresholds),
        Some(Commands::Fragments {
            input,
            output,
            compact,
        }) => cmd_fragments(&input, output.as_deref(), compact),
        Some(Commands::Reflow {
            input,
            output,
            text,
            html,
            strict,
        }) => cmd_reflow(&input, output.as_deref(), text, html, strict, thresholds),
        Some(Commands::Info { input, json }) => cmd_info(&input, json, thresholds),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), thresholds)
            } else {
                println!("{}", "Usage: pdfreflow <FILE> [OUTPUT]".yellow());
                println!("       pdfreflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn error_mode(strict: bool) -> ErrorMode {
    if strict {
        ErrorMode::Strict
    } else {
        ErrorMode::Lenient
    }
}

fn reflow_options(strict: bool, thresholds: Thresholds) -> ReflowOptions {
    ReflowOptions::new()
        .with_error_mode(error_mode(strict))
        .with_thresholds(thresholds)
        .with_parallel(true)
}

fn page_selection(pages: Option<&str>) -> Result<PageSelection, Box<dyn std::error::Error>> {
    let selection = match pages {
        Some(p) => PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?,
        None => PageSelection::All,
    };
    log::debug!("Page selection: {:?}", selection);
    Ok(selection)
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        log::debug!("Writing {} bytes to {}", content.len(), path.display());
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_path = match output {
        Some(path) if path.is_dir() => path.join(output_file_name(input)),
        Some(path) => path.to_path_buf(),
        None => output_file_name(input),
    };
    log::debug!("Converting {} to {}", input.display(), output_path.display());

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    // Lenient so one broken page doesn't sink the whole document
    pb.set_message("Parsing PDF...");
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    pb.inc(1);

    pb.set_message(format!("Reflowing {} pages...", doc.page_count()));
    let render_options = RenderOptions::new().with_reflow(reflow_options(false, thresholds));
    let result = render::to_markdown_with_stats(&doc, &render_options)?;
    pb.inc(1);

    pb.set_message("Writing Markdown...");
    fs::write(&output_path, &result.content)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} pages, {} words)",
        "Saved to".green().bold(),
        output_path.display(),
        result.stats.page_count,
        result.stats.word_count
    );
    if result.stats.skipped_fragments > 0 {
        println!(
            "{} {} fragments without a usable position were skipped",
            "Warning:".yellow(),
            result.stats.skipped_fragments
        );
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    pages: Option<&str>,
    strict: bool,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = page_selection(pages)?;

    let options = ParseOptions::new()
        .with_error_mode(error_mode(strict))
        .with_pages(page_selection.clone());
    let doc = parse_file_with_options(input, options)?;

    let render_options = RenderOptions::new()
        .with_frontmatter(frontmatter)
        .with_pages(page_selection)
        .with_reflow(reflow_options(strict, thresholds));

    let markdown = render::to_markdown(&doc, &render_options)?;
    write_output(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = page_selection(pages)?;

    let options = ParseOptions::new()
        .lenient()
        .with_pages(page_selection.clone());
    let doc = parse_file_with_options(input, options)?;

    let render_options = RenderOptions::new()
        .with_pages(page_selection)
        .with_reflow(reflow_options(false, thresholds));

    let text = render::to_text(&doc, &render_options)?;
    write_output(output, &text)
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = page_selection(pages)?;

    let options = ParseOptions::new()
        .lenient()
        .with_pages(page_selection.clone());
    let doc = parse_file_with_options(input, options)?;

    let render_options = RenderOptions::new()
        .with_pages(page_selection)
        .with_reflow(reflow_options(false, thresholds));

    let html = render::to_html(&doc, &render_options)?;
    write_output(output, &html)
}

fn cmd_fragments(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_output(output, &json)
}

fn cmd_reflow(
    input: &Path,
    output: Option<&Path>,
    text: bool,
    html: bool,
    strict: bool,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let doc: Document = parse_text_content(&json)?;
    log::debug!("Loaded {} pages from {}", doc.page_count(), input.display());

    let render_options = RenderOptions::new().with_reflow(reflow_options(strict, thresholds));
    let content = if text {
        render::to_text(&doc, &render_options)?
    } else if html {
        render::to_html(&doc, &render_options)?
    } else {
        render::to_markdown(&doc, &render_options)?
    };

    write_output(output, &content)
}

fn cmd_info(
    input: &Path,
    json: bool,
    thresholds: Thresholds,
) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient: show metadata even if some pages can't be read
    let doc = parse_file_with_options(input, ParseOptions::new().lenient())?;
    let render_options = RenderOptions::new().with_reflow(reflow_options(false, thresholds));
    let result = render::to_markdown_with_stats(&doc, &render_options)?;

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "metadata": result.metadata,
            "stats": result.stats,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let metadata = &result.metadata;
    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), metadata.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if metadata.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    let stats = &result.stats;
    println!();
    println!("{}", "Reflow Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Fragments".bold(), stats.fragment_count);
    println!("{}: {}", "Skipped".bold(), stats.skipped_fragments);
    println!("{}: {}", "Paragraph breaks".bold(), stats.paragraph_breaks);
    println!("{}: {}", "Line breaks".bold(), stats.line_breaks);
    println!("{}: {}", "Inserted spaces".bold(), stats.spaces);
    println!("{}: {}", "Bold runs".bold(), stats.bold_runs);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfreflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF text reflow tool");
    println!();
    println!("License: MIT");
}
