//! Apple Notes markdown export parser
//!
//! Notes are exported one per file as `<Title> - <YYYY-MM-DD>.md`. The title
//! and creation date come from the filename; the content is the raw
//! markdown.

use crate::discovery::{file_stem, list_files, read_file};
use crate::error::ParserError;
use chrono::{DateTime, NaiveDate, Utc};
use ideaminer_domain::{ParsedNote, SourceType};
use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{error, warn};

/// Notes parsed from an export directory
#[derive(Debug, Clone, Default)]
pub struct NotesDirectory {
    /// Parsed notes, newest first
    pub notes: Vec<ParsedNote>,

    /// Recognized file names, in discovery order
    pub files: Vec<String>,
}

/// List the note files in `dir`
pub async fn discover(dir: &Path) -> Result<Vec<String>, ParserError> {
    list_files(dir, SourceType::AppleNote.extension()).await
}

/// Parse one note file
pub async fn parse_file(path: &Path) -> Result<ParsedNote, ParserError> {
    let content = read_file(path).await?;
    Ok(note_from_content(path, content))
}

/// Build a note from its path and raw content
pub fn note_from_content(path: &Path, content: String) -> ParsedNote {
    let stem = file_stem(path);
    let (title, created_at) = title_and_date(&stem);

    ParsedNote {
        title,
        content,
        created_at,
        filepath: path.to_path_buf(),
    }
}

/// Parse every note in `dir`, newest first
///
/// Notes that fail to read are logged and skipped.
pub async fn scan_directory(dir: &Path) -> Result<NotesDirectory, ParserError> {
    let files = discover(dir).await?;

    let mut notes = Vec::new();
    for file in &files {
        match parse_file(&dir.join(file)).await {
            Ok(note) => notes.push(note),
            Err(e) => error!("Error processing file {}: {}", file, e),
        }
    }

    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(NotesDirectory { notes, files })
}

/// Render note markdown to HTML
///
/// Presentation helper only; extraction always works on the raw markdown.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

/// `<Title> - YYYY-MM-DD`
static TITLE_DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+) - (\d{4}-\d{2}-\d{2})$").expect("valid note filename pattern")
});

fn title_and_date(stem: &str) -> (String, DateTime<Utc>) {
    let Some(caps) = TITLE_DATE_PATTERN.captures(stem) else {
        return (stem.to_string(), Utc::now());
    };

    let title = caps[1].trim().to_string();
    let created_at = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());

    match created_at {
        Some(created_at) => (title, created_at),
        None => {
            warn!("Invalid date in note filename: {:?}", stem);
            (title, Utc::now())
        }
    }
}
