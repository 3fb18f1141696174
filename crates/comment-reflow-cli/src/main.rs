//! Command-line host for `comment-reflow`.
//!
//! Loads a file into an in-memory buffer, puts the cursor at `--row`/`--column`, runs one
//! engine operation and prints the result (or writes it back with `--in-place`).
//!
//! # Usage
//!
//! ```bash
//! # Reflow the block around line 12 of a Python file and print the file
//! comment-reflow src/app.py block --row 12
//!
//! # Reflow from line 30 to the end of its paragraph, in place
//! comment-reflow lib.c paragraph --row 30 --in-place
//!
//! # Open a new block at line 5, indented by 4
//! comment-reflow script.sh create --row 5 --column 4 --json
//! ```
//!
//! The language is inferred from the file extension unless `--language` is given. Skipped
//! operations (no comment under the cursor, protected header, unknown language) are not
//! errors: the file is printed unchanged and the reason is logged.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comment_reflow::{
    BufferAdapter, CursorPosition, ReflowConfig, ReflowEngine, ReflowOutcome, RopeBuffer,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File to operate on
    file: PathBuf,

    #[command(subcommand)]
    command: Commands,

    /// Cursor row (1-indexed)
    #[arg(long, global = true, default_value_t = 1)]
    row: usize,

    /// Cursor column (0-indexed, in characters)
    #[arg(long, global = true, default_value_t = 0)]
    column: usize,

    /// Language id; inferred from the file extension when omitted
    #[arg(long, global = true)]
    language: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the result back to FILE instead of printing it
    #[arg(long, global = true)]
    in_place: bool,

    /// Print a JSON report instead of the file contents
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
enum Commands {
    /// Insert an empty bordered comment block at the cursor
    Create,
    /// Reflow the whole comment block under the cursor
    Block,
    /// Reflow from the cursor row to the end of its paragraph
    Paragraph,
}

#[derive(Serialize)]
struct Report<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cursor: Option<CursorPosition>,
    changed: bool,
    language: &'a str,
    lines: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let config = match &cli.config {
        Some(path) => ReflowConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReflowConfig::default(),
    };
    let engine = ReflowEngine::new(config).context("invalid configuration")?;

    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let language = cli
        .language
        .clone()
        .unwrap_or_else(|| language_from_path(&cli.file));
    log::debug!("{}: language '{}'", cli.file.display(), language);

    let mut buffer = RopeBuffer::new(&text, language.as_str()).with_cursor(cli.row, cli.column);
    let outcome = match cli.command {
        Commands::Create => engine.create_block(&mut buffer),
        Commands::Block => engine.reflow_whole_block(&mut buffer),
        Commands::Paragraph => engine.reflow_from_cursor(&mut buffer),
    };
    if let ReflowOutcome::Skipped(reason) = &outcome {
        log::info!("nothing done: {}", reason);
    }

    if cli.in_place && outcome.is_changed() {
        std::fs::write(&cli.file, buffer.text())
            .with_context(|| format!("failed to write {}", cli.file.display()))?;
    }

    if cli.json {
        let report = Report {
            status: if outcome.is_applied() { "applied" } else { "skipped" },
            reason: outcome.skip_reason().map(ToString::to_string),
            cursor: outcome.cursor(),
            changed: outcome.is_changed(),
            language: &language,
            lines: buffer.lines(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.in_place {
        print!("{}", buffer.text());
        if let Some(cursor) = outcome.cursor() {
            log::debug!("cursor at {}:{}", cursor.row, cursor.column);
        }
    }

    // The host would enter insert mode here; a one-shot CLI just reports where typing starts.
    if cli.command == Commands::Create && buffer.in_text_input_mode() && !cli.json {
        let cursor = buffer.cursor();
        eprintln!("block created; type at {}:{}", cursor.row, cursor.column);
    }

    Ok(())
}

/// Map a file extension to a language id. Unknown extensions are passed through so that
/// config-defined styles (e.g. `[styles.lua]`) can match them.
fn language_from_path(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let language = match extension.as_str() {
        "py" | "pyi" => "python",
        "sh" | "bash" | "zsh" => "sh",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hh" | "hpp" | "hxx" => "cpp",
        "scm" | "ss" | "rkt" => "scheme",
        "vim" => "vim",
        "rs" => "rust",
        "toml" => "toml",
        other => other,
    };
    language.to_string()
}
