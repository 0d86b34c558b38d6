//! HTML quiz sheets.
//!
//! Produces a self-contained, printable HTML file with the CSS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::assembler::quiz_offsets;
use quizforge_core::model::{AnswerKeyEntry, Paragraph, QuizStyle};
use quizforge_core::pipeline::GeneratedQuiz;

use crate::text::{answers_by_paragraph, footer_line, format_answer_key, summary_line};

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Paragraph text with every blank wrapped in a `blank` span.
fn paragraph_body(p: &Paragraph, blanks: &[(usize, &AnswerKeyEntry)]) -> String {
    let mut body = String::new();
    let mut cursor = 0;
    for &(offset, entry) in blanks {
        if offset < p.start || offset >= p.end {
            continue;
        }
        let local = offset - p.start;
        let end = local + entry.blank.len();
        let (Some(before), Some(blank)) = (p.text.get(cursor..local), p.text.get(local..end))
        else {
            continue;
        };
        body.push_str(&html_escape(before));
        body.push_str("<span class=\"blank\">");
        body.push_str(&html_escape(blank));
        body.push_str("</span>");
        cursor = end;
    }
    body.push_str(&html_escape(p.text.get(cursor..).unwrap_or_default()));
    body
}

fn push_answers(html: &mut String, label: Option<&str>, entries: &[AnswerKeyEntry]) {
    html.push_str("<p class=\"answers\">");
    if let Some(label) = label {
        html.push_str(&format!("<strong>{label}</strong> "));
    }
    html.push_str(&html_escape(&format_answer_key(entries)));
    html.push_str("</p>\n");
}

/// Render a quiz as an HTML page in its configured style.
pub fn render_html(quiz: &GeneratedQuiz) -> String {
    let key = &quiz.result.answer_key;
    let offsets = quiz_offsets(key);
    let blanks: Vec<(usize, &AnswerKeyEntry)> = offsets.into_iter().zip(key.iter()).collect();
    let grouped = match quiz.style {
        QuizStyle::SplitPage => Some(answers_by_paragraph(quiz)),
        QuizStyle::FullPage => None,
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(&quiz.name)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&quiz.name)));
    html.push_str(&format!(
        "<p class=\"meta\">{}</p>\n",
        html_escape(&summary_line(quiz))
    ));
    html.push_str("</header>\n");

    html.push_str("<main>\n");
    for (i, p) in quiz.paragraphs.iter().enumerate() {
        let body = paragraph_body(p, &blanks);
        if p.is_heading {
            html.push_str(&format!("<h2>{body}</h2>\n"));
        } else {
            html.push_str(&format!("<p>{body}</p>\n"));
        }
        if let Some(answers) = grouped.as_ref().and_then(|g| g.get(i)) {
            if !answers.is_empty() {
                push_answers(&mut html, Some("Answers:"), answers);
            }
        }
    }
    html.push_str("</main>\n");

    if grouped.is_none() {
        html.push_str("<section class=\"answer-key\">\n<h2>Answer Key</h2>\n");
        push_answers(&mut html, None, key);
        html.push_str("</section>\n");
    }

    html.push_str(&format!(
        "<footer>{}</footer>\n",
        html_escape(&footer_line())
    ));
    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML sheet to a file.
pub fn write_html(quiz: &GeneratedQuiz, path: &Path) -> Result<()> {
    let html = render_html(quiz);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: Georgia, 'Times New Roman', serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.7; }
.meta { color: #6b7280; font-family: sans-serif; font-size: 0.9rem; }
.blank { font-family: 'DejaVu Sans Mono', monospace; letter-spacing: 0.05em; }
.answers { font-size: 0.9rem; border-left: 3px solid #d1d5db; padding-left: 0.75rem; }
.answer-key { page-break-before: always; }
footer { margin-top: 3rem; color: #9ca3af; font-size: 0.8rem; }
@media print { .answer-key { page-break-before: always; } }
"#;
