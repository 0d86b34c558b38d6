//! Coverage and length statistics for a finished quiz.

use crate::model::{Difficulty, QuizMetadata};

/// Derive [`QuizMetadata`] from the texts before and after substitution.
pub fn calculate_metadata(
    source_text: &str,
    quiz_text: &str,
    total_blanks: usize,
    difficulty: Difficulty,
) -> QuizMetadata {
    let original_word_count = source_text.split_whitespace().count();

    QuizMetadata {
        difficulty,
        original_length: source_text.chars().count(),
        quiz_length: quiz_text.chars().count(),
        original_word_count,
        blanked_word_count: total_blanks,
        coverage_percentage: coverage_percentage(total_blanks, original_word_count),
        total_blanks,
    }
}

/// `blanked / original * 100`, rounded to one decimal place; 0 when there
/// are no words.
pub fn coverage_percentage(blanked: usize, original: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    let pct = blanked as f64 / original as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}
