//! Paragraph segmentation of finished quiz text.
//!
//! The heading flag is presentation metadata only. A short upper-case
//! sentence cannot be told apart from a real section heading.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::Paragraph;

/// One or more blank lines.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph break regex"));

/// Headings are shorter than this many characters.
pub const HEADING_MAX_CHARS: usize = 100;

/// Split `quiz_text` into trimmed, non-empty paragraphs with their byte spans.
pub fn segment_paragraphs(quiz_text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut piece_start = 0;

    let breaks = PARAGRAPH_BREAK
        .find_iter(quiz_text)
        .map(|m| (m.start(), m.end()))
        .chain(std::iter::once((quiz_text.len(), quiz_text.len())));

    for (break_start, break_end) in breaks {
        let piece = &quiz_text[piece_start..break_start];
        let trimmed = piece.trim();
        if !trimmed.is_empty() {
            let start = piece_start + (piece.len() - piece.trim_start().len());
            paragraphs.push(Paragraph {
                text: trimmed.to_string(),
                start,
                end: start + trimmed.len(),
                is_heading: looks_like_heading(trimmed),
            });
        }
        piece_start = break_end;
    }

    paragraphs
}

/// Short and either ending with a colon or fully upper-case.
pub fn looks_like_heading(text: &str) -> bool {
    text.chars().count() < HEADING_MAX_CHARS && (text.ends_with(':') || is_all_upper(text))
}

fn is_all_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}
