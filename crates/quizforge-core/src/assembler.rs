//! Splicing blanks into the source text.
//!
//! Occurrences arrive sorted by start offset descending. Splicing from the
//! highest offset downward means no pending offset is ever shifted by an
//! earlier replacement, so every `start` recorded against the source text is
//! still valid at the moment it is used.

use crate::blank::generate_blank;
use crate::model::{AnswerKeyEntry, Difficulty, Occurrence};

/// Quiz text with blanks substituted, plus its ascending answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    pub quiz_text: String,
    pub answer_key: Vec<AnswerKeyEntry>,
}

/// Replace every accepted occurrence with its blank.
///
/// `accepted` must be non-overlapping and ordered by start descending, which
/// is exactly what [`crate::resolver::resolve_overlaps`] returns.
pub fn assemble(source: &str, accepted: &[Occurrence<'_>], difficulty: Difficulty) -> Assembled {
    debug_assert!(
        accepted.windows(2).all(|w| w[0].start >= w[1].end()),
        "occurrences must be disjoint and sorted by start descending"
    );

    let mut quiz_text = source.to_string();
    let mut answer_key = Vec::with_capacity(accepted.len());

    for occ in accepted {
        let blank = generate_blank(&occ.matched_text, difficulty);
        quiz_text.replace_range(occ.start..occ.end(), &blank);

        answer_key.push(AnswerKeyEntry {
            answer: occ.matched_text.clone(),
            blank,
            position: occ.start,
            importance: occ.term.importance,
            word_type: occ.term.word_type.clone(),
        });
    }

    answer_key.sort_by_key(|entry| entry.position);

    Assembled {
        quiz_text,
        answer_key,
    }
}

/// Byte offset of each blank inside the quiz text.
///
/// `answer_key` must be sorted ascending by `position`; the returned offsets
/// follow the same order.
pub fn quiz_offsets(answer_key: &[AnswerKeyEntry]) -> Vec<usize> {
    let mut shift: isize = 0;
    answer_key
        .iter()
        .map(|entry| {
            let offset = (entry.position as isize + shift) as usize;
            shift += entry.blank.len() as isize - entry.answer.len() as isize;
            offset
        })
        .collect()
}
