//! The quiz builder: one synchronous pass from source text and candidate
//! terms to a finished [`BuildResult`].
//!
//! Stages run in a fixed order: find occurrences per term, resolve overlaps
//! across the union, splice blanks from the highest offset down, then derive
//! metadata. Resolution and splicing must stay a single serial pass in
//! descending-offset order.

use serde::{Deserialize, Serialize};

use crate::assembler::assemble;
use crate::error::QuizError;
use crate::finder::find_all;
use crate::metadata::calculate_metadata;
use crate::model::{BuildResult, Difficulty, Paragraph, Term};
use crate::resolver::resolve_overlaps;
use crate::segment::segment_paragraphs;

/// Default cap on blanks per term.
pub const DEFAULT_MAX_OCCURRENCES_PER_TERM: usize = 2;

/// Configuration for a single build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Controls hint-letter counts.
    pub difficulty: Difficulty,
    /// Only the first N matches of each term are candidates. Must be >= 1.
    pub max_occurrences_per_term: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            max_occurrences_per_term: DEFAULT_MAX_OCCURRENCES_PER_TERM,
        }
    }
}

impl BuilderConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Default::default()
        }
    }

    pub fn with_max_occurrences(mut self, max: usize) -> Self {
        self.max_occurrences_per_term = max;
        self
    }
}

/// Builds cloze quizzes. Holds no state between builds.
#[derive(Debug, Clone, Default)]
pub struct QuizBuilder {
    config: BuilderConfig,
}

impl QuizBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a quiz from `source_text` and the selector's `terms`.
    ///
    /// Fails with [`QuizError::InvalidInput`] for empty source text or a zero
    /// occurrence cap. Empty term words are skipped.
    pub fn build(&self, source_text: &str, terms: &[Term]) -> Result<BuildResult, QuizError> {
        if source_text.trim().is_empty() {
            return Err(QuizError::invalid("source text is empty"));
        }
        if self.config.max_occurrences_per_term == 0 {
            return Err(QuizError::invalid(
                "max_occurrences_per_term must be at least 1",
            ));
        }

        let candidates = find_all(source_text, terms, self.config.max_occurrences_per_term);
        tracing::debug!(
            "found {} candidate occurrences for {} terms",
            candidates.len(),
            terms.len()
        );

        let accepted = resolve_overlaps(candidates);
        tracing::debug!("{} occurrences survive overlap resolution", accepted.len());

        let assembled = assemble(source_text, &accepted, self.config.difficulty);
        let metadata = calculate_metadata(
            source_text,
            &assembled.quiz_text,
            assembled.answer_key.len(),
            self.config.difficulty,
        );

        Ok(BuildResult {
            quiz_text: assembled.quiz_text,
            answer_key: assembled.answer_key,
            metadata,
        })
    }
}

impl BuildResult {
    /// Paragraph units of the quiz text for renderers.
    pub fn paragraphs(&self) -> Vec<Paragraph> {
        segment_paragraphs(&self.quiz_text)
    }
}
