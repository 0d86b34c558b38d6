//! Parsing term-selection responses.
//!
//! The selection stage answers with a JSON object listing the words to blank.
//! Replies from a language model are often wrapped in prose or a fenced code
//! block, so the JSON body is located before parsing.

use serde::{Deserialize, Serialize};

use crate::error::TermSourceError;
use crate::model::Term;

/// How much of a bad response to quote in error messages.
const RESPONSE_EXCERPT_CHARS: usize = 500;

/// A parsed term-selection response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermSelection {
    /// Candidate terms in the selector's order.
    pub words_to_blank: Vec<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// The selector's own coverage estimate, as a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_words_selected: Option<usize>,
}

impl TermSelection {
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self {
            words_to_blank: terms,
            difficulty: None,
            estimated_coverage: None,
            total_words_selected: None,
        }
    }

    pub fn terms(&self) -> &[Term] {
        &self.words_to_blank
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.words_to_blank
    }
}

/// Locate the JSON body inside a model reply.
///
/// Prefers a ```` ```json ```` fence, then a reply that is itself a JSON
/// array, then the span from the first `{` to the last `}`, then the whole
/// trimmed text.
pub fn extract_json_block(text: &str) -> &str {
    if let Some(fence) = text.find("```json") {
        let body_start = fence + "```json".len();
        let body = &text[body_start..];
        let body_end = body.find("```").unwrap_or(body.len());
        return body[..body_end].trim();
    }

    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        return trimmed;
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => text[first..=last].trim(),
        _ => trimmed,
    }
}

/// Parse a selection response: an object with `words_to_blank`, or a bare
/// array of terms.
pub fn parse_selection_response(text: &str) -> Result<TermSelection, TermSourceError> {
    let body = extract_json_block(text);
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        TermSourceError::Malformed(format!(
            "failed to parse response as JSON: {e}\nResponse: {}",
            excerpt(text)
        ))
    })?;

    if value.is_array() {
        let terms: Vec<Term> = serde_json::from_value(value)
            .map_err(|e| TermSourceError::Malformed(format!("invalid term list: {e}")))?;
        return Ok(TermSelection::from_terms(terms));
    }

    if value.get("words_to_blank").is_none() {
        return Err(TermSourceError::Malformed(
            "response missing 'words_to_blank' field".into(),
        ));
    }

    serde_json::from_value(value)
        .map_err(|e| TermSourceError::Malformed(format!("invalid term selection: {e}")))
}

fn excerpt(text: &str) -> String {
    text.chars().take(RESPONSE_EXCERPT_CHARS).collect()
}
