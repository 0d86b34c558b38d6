//! Writing generated quizzes to the data directory.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizforge_core::pipeline::GeneratedQuiz;
use quizforge_core::record::{QuizRecord, QuizStore};
use quizforge_report::{write_sheet, SheetFormat};

/// Write every requested sheet and the quiz record. Returns the written paths.
pub fn save_quiz(
    store: &QuizStore,
    quiz: &GeneratedQuiz,
    formats: &[SheetFormat],
) -> Result<Vec<PathBuf>> {
    store.ensure_available(&quiz.name)?;

    let dir = store.quizzes_dir();
    let mut paths = formats
        .iter()
        .map(|format| write_sheet(quiz, *format, &dir))
        .collect::<Result<Vec<_>>>()?;
    paths.push(store.save(&QuizRecord::from_generated(quiz))?);
    Ok(paths)
}

pub fn print_summary(quizzes: &[GeneratedQuiz]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Quiz",
        "Difficulty",
        "Style",
        "Terms",
        "Blanks",
        "Words",
        "Coverage",
    ]);

    for quiz in quizzes {
        let meta = &quiz.result.metadata;
        table.add_row(vec![
            Cell::new(&quiz.name),
            Cell::new(meta.difficulty),
            Cell::new(quiz.style),
            Cell::new(quiz.terms_offered),
            Cell::new(meta.total_blanks),
            Cell::new(meta.original_word_count),
            Cell::new(format!("{:.1}%", meta.coverage_percentage)),
        ]);
    }

    eprintln!("\n{table}");
}
