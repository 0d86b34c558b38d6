//! Error types for quiz building and term selection.

use thiserror::Error;

/// Errors raised by the quiz-building engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    /// The caller supplied input the engine refuses to process.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl QuizError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QuizError::InvalidInput(message.into())
    }
}

/// Errors that can occur when asking a term source for candidate terms.
#[derive(Debug, Error)]
pub enum TermSourceError {
    /// The backing service asked us to slow down.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// No selection exists for the requested quiz.
    #[error("no term selection found for quiz '{0}'")]
    NotFound(String),

    /// The selection response could not be understood.
    #[error("malformed term selection: {0}")]
    Malformed(String),

    /// The source did not answer in time.
    #[error("term source timed out after {0}s")]
    Timeout(u64),

    /// The source is temporarily unreachable.
    #[error("term source unavailable: {0}")]
    Unavailable(String),
}

impl TermSourceError {
    /// Returns `true` if this error is permanent and should not be retried.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            TermSourceError::NotFound(_) | TermSourceError::Malformed(_)
        )
    }

    /// Returns the retry-after delay in milliseconds, if applicable.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            TermSourceError::RateLimited { retry_after_ms } => Some(*retry_after_ms),
            _ => None,
        }
    }
}
