//! Quiz sheet rendering for quizforge.
//!
//! Turns a [`GeneratedQuiz`](quizforge_core::pipeline::GeneratedQuiz) into a
//! printable plain-text sheet, a self-contained HTML page, or a JSON dump of
//! the build result.

pub mod html;
pub mod json;
pub mod text;

use std::path::{Path, PathBuf};

use anyhow::Result;
use quizforge_core::manifest::is_safe_quiz_name;
use quizforge_core::pipeline::GeneratedQuiz;

pub use text::{answers_by_paragraph, format_answer_key, render_text};

/// Output formats for a rendered quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetFormat {
    Text,
    Html,
    Json,
}

impl SheetFormat {
    pub const ALL: [SheetFormat; 3] = [SheetFormat::Text, SheetFormat::Html, SheetFormat::Json];

    pub fn extension(self) -> &'static str {
        match self {
            SheetFormat::Text => "txt",
            SheetFormat::Html => "html",
            SheetFormat::Json => "json",
        }
    }

    /// Parse a comma-separated list such as `text,html` or `all`.
    pub fn parse_list(s: &str) -> Result<Vec<SheetFormat>> {
        let mut formats = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let parsed: &[SheetFormat] = match part.to_ascii_lowercase().as_str() {
                "all" => &Self::ALL,
                "text" | "txt" => &[SheetFormat::Text],
                "html" => &[SheetFormat::Html],
                "json" => &[SheetFormat::Json],
                other => anyhow::bail!("unknown format '{other}' (expected text, html, json or all)"),
            };
            for format in parsed {
                if !formats.contains(format) {
                    formats.push(*format);
                }
            }
        }
        anyhow::ensure!(!formats.is_empty(), "no output format given");
        Ok(formats)
    }
}

/// Write one sheet to `<dir>/<quiz name>.<ext>` and return its path.
pub fn write_sheet(quiz: &GeneratedQuiz, format: SheetFormat, dir: &Path) -> Result<PathBuf> {
    anyhow::ensure!(
        is_safe_quiz_name(&quiz.name),
        "quiz name '{}' is not usable as a file name",
        quiz.name
    );
    let path = dir.join(format!("{}.{}", quiz.name, format.extension()));
    match format {
        SheetFormat::Text => text::write_text(quiz, &path)?,
        SheetFormat::Html => html::write_html(quiz, &path)?,
        SheetFormat::Json => json::write_json(quiz, &path)?,
    }
    Ok(path)
}
