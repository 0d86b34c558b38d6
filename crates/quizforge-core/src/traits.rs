//! The term-source trait.
//!
//! Term sources stand in for the selection stage that proposes which words to
//! blank. Implementations live in `quizforge-terms`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::Difficulty;
use crate::selection::TermSelection;

/// Something that can propose candidate terms for a quiz.
#[async_trait]
pub trait TermSource: Send + Sync {
    /// Human-readable source name (e.g. "directory").
    fn name(&self) -> &str;

    /// Propose terms for one quiz.
    ///
    /// Errors that are a [`crate::error::TermSourceError`] are classified for
    /// retries; any other error is treated as transient.
    async fn select(&self, request: &SelectionRequest) -> anyhow::Result<TermSelection>;
}

/// What a term source is asked to select terms for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    /// Name of the quiz being generated.
    pub quiz_name: String,
    /// Extracted source text.
    pub source_text: String,
    pub difficulty: Difficulty,
}
