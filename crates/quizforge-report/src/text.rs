//! Plain-text quiz sheets.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::assembler::quiz_offsets;
use quizforge_core::model::{AnswerKeyEntry, QuizStyle};
use quizforge_core::pipeline::GeneratedQuiz;

const ANSWER_SEPARATOR: &str = "    ";

/// Answers in key order, separated by four spaces.
pub fn format_answer_key(entries: &[AnswerKeyEntry]) -> String {
    if entries.is_empty() {
        return "No answers.".to_string();
    }
    entries
        .iter()
        .map(|e| e.answer.as_str())
        .collect::<Vec<_>>()
        .join(ANSWER_SEPARATOR)
}

/// Group answer-key entries by the paragraph whose span holds their blank.
///
/// The result has one (possibly empty) list per paragraph, in paragraph order.
pub fn answers_by_paragraph(quiz: &GeneratedQuiz) -> Vec<Vec<AnswerKeyEntry>> {
    let key = &quiz.result.answer_key;
    let offsets = quiz_offsets(key);
    quiz.paragraphs
        .iter()
        .map(|p| {
            key.iter()
                .zip(&offsets)
                .filter(|(_, offset)| (p.start..p.end).contains(*offset))
                .map(|(entry, _)| entry.clone())
                .collect()
        })
        .collect()
}

pub(crate) fn summary_line(quiz: &GeneratedQuiz) -> String {
    let meta = &quiz.result.metadata;
    format!(
        "Difficulty: {} | Style: {} | Blanks: {} | Coverage: {:.1}%",
        meta.difficulty, quiz.style, meta.total_blanks, meta.coverage_percentage
    )
}

pub(crate) fn footer_line() -> String {
    format!(
        "Generated by quizforge on {}",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// Render a quiz as a plain-text sheet in its configured style.
pub fn render_text(quiz: &GeneratedQuiz) -> String {
    let mut out = String::new();
    out.push_str(&quiz.name);
    out.push('\n');
    out.push_str(&summary_line(quiz));
    out.push_str("\n\n");

    match quiz.style {
        QuizStyle::FullPage => {
            for p in &quiz.paragraphs {
                out.push_str(&p.text);
                out.push_str("\n\n");
            }
            out.push_str("Answer Key\n");
            out.push_str(&format_answer_key(&quiz.result.answer_key));
            out.push_str("\n\n");
        }
        QuizStyle::SplitPage => {
            let grouped = answers_by_paragraph(quiz);
            for (p, answers) in quiz.paragraphs.iter().zip(&grouped) {
                out.push_str(&p.text);
                out.push('\n');
                if !answers.is_empty() {
                    out.push_str("Answers: ");
                    out.push_str(&format_answer_key(answers));
                    out.push('\n');
                }
                out.push('\n');
            }
        }
    }

    out.push_str(&footer_line());
    out.push('\n');
    out
}

pub fn write_text(quiz: &GeneratedQuiz, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, render_text(quiz))
        .with_context(|| format!("failed to write {}", path.display()))
}
