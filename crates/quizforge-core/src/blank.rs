//! Blank generation: hint letters followed by underscores.
//!
//! Every hidden letter becomes exactly two underscores so handwritten answers
//! have room on the printed sheet.

use crate::model::Difficulty;

/// Underscores written per hidden letter.
pub const UNDERSCORES_PER_LETTER: usize = 2;

/// Number of leading letters revealed for a word of `len` chars.
///
/// Never exceeds `len`.
pub fn hint_count(len: usize, difficulty: Difficulty) -> usize {
    let hint = match difficulty {
        Difficulty::Easy => (len * 45 / 100).clamp(1, 4),
        Difficulty::Medium => (len * 27 / 100).clamp(1, 3),
        Difficulty::Hard => 1,
    };
    hint.min(len)
}

/// Build the blank for `word`, keeping the hint letters' original case.
pub fn generate_blank(word: &str, difficulty: Difficulty) -> String {
    let len = word.chars().count();
    let hint = hint_count(len, difficulty);

    let mut blank: String = word.chars().take(hint).collect();
    blank.push_str(&"_".repeat((len - hint) * UNDERSCORES_PER_LETTER));
    blank
}
