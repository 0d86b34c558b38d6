//! Core data model types for quizforge.
//!
//! These are the values that flow through a quiz build: the candidate terms
//! handed over by the term-selection stage, the occurrences located in the
//! source text, and the finished build result with its answer key.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::QuizError;

/// Difficulty tier. Controls how many hint letters each blank reveals.
///
/// Deserializes through [`FromStr`], so any casing is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(QuizError::invalid(format!(
                "unknown difficulty: '{other}' (expected Easy, Medium or Hard)"
            ))),
        }
    }
}

/// Page layout chosen for the rendered quiz sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum QuizStyle {
    /// Quiz text first, the whole answer key after it.
    #[default]
    #[serde(rename = "Full Page")]
    FullPage,
    /// Each paragraph followed by the answers for its own blanks.
    #[serde(rename = "Split Page")]
    SplitPage,
}

impl fmt::Display for QuizStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizStyle::FullPage => write!(f, "Full Page"),
            QuizStyle::SplitPage => write!(f, "Split Page"),
        }
    }
}

impl FromStr for QuizStyle {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "full page" | "full" => Ok(QuizStyle::FullPage),
            "split page" | "split" => Ok(QuizStyle::SplitPage),
            other => Err(QuizError::invalid(format!(
                "unknown quiz style: '{other}' (expected Full Page or Split Page)"
            ))),
        }
    }
}

/// Deserialize a string-valued enum through its `FromStr` impl.
fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = QuizError>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

impl<'de> Deserialize<'de> for QuizStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_from_str(deserializer)
    }
}

/// A word or phrase proposed for blanking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// The word as the selector wrote it; matched case-insensitively.
    pub word: String,
    /// Ranking weight, nominally in `[0, 1]` but never clamped.
    #[serde(default = "default_importance")]
    pub importance: f64,
    /// Free-form tag such as `key_concept` or `technical_term`.
    #[serde(default = "default_word_type")]
    pub word_type: String,
    /// Snippet the selector quoted to show where the word first appears.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_occurrence_context: Option<String>,
}

fn default_importance() -> f64 {
    0.5
}

fn default_word_type() -> String {
    "unknown".to_string()
}

impl Term {
    pub fn new(word: impl Into<String>, importance: f64, word_type: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            importance,
            word_type: word_type.into(),
            first_occurrence_context: None,
        }
    }
}

/// One located match of a term inside the source text.
///
/// `start` and `length` are byte offsets into the source and always fall on
/// char boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence<'t> {
    pub start: usize,
    pub length: usize,
    /// The matched span exactly as it appears in the source.
    pub matched_text: String,
    pub term: &'t Term,
}

impl Occurrence<'_> {
    /// Exclusive end offset of the matched span.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Whether the half-open spans of `self` and `other` intersect.
    pub fn overlaps(&self, other: &Occurrence<'_>) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}

/// Maps one blank back to the word it hides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    /// The hidden word, original casing.
    pub answer: String,
    /// Hint letters followed by underscores.
    pub blank: String,
    /// Byte offset of the answer in the original source text.
    pub position: usize,
    pub importance: f64,
    pub word_type: String,
}

/// Coverage and length statistics for a finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizMetadata {
    pub difficulty: Difficulty,
    /// Character count of the source text.
    pub original_length: usize,
    /// Character count of the quiz text.
    pub quiz_length: usize,
    pub original_word_count: usize,
    pub blanked_word_count: usize,
    /// Blanked words as a percentage of source words, one decimal place.
    pub coverage_percentage: f64,
    pub total_blanks: usize,
}

/// The complete output of one quiz build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    pub quiz_text: String,
    /// Sorted ascending by `position`.
    pub answer_key: Vec<AnswerKeyEntry>,
    pub metadata: QuizMetadata,
}

/// A paragraph-level unit of the quiz text, handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    /// Byte span of `text` inside the quiz text.
    pub start: usize,
    pub end: usize,
    /// Heuristic: short and ending in a colon or fully upper-case.
    pub is_heading: bool,
}

/// Where a quiz's source text comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSource {
    /// Text given inline in the manifest.
    Text(String),
    /// A UTF-8 text file already produced by the extraction stage.
    File(PathBuf),
}

/// Where a quiz's candidate terms come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermsSpec {
    /// Terms listed inline in the manifest.
    Inline(Vec<Term>),
    /// A saved term-selection response.
    File(PathBuf),
    /// Ask the configured term source.
    FromSource,
}

/// One quiz to generate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizJob {
    /// Unique name; also the file stem of every output.
    pub name: String,
    pub source: QuizSource,
    pub terms: TermsSpec,
    pub difficulty: Difficulty,
    pub style: QuizStyle,
    pub max_occurrences_per_term: usize,
}

/// A collection of quiz jobs loaded from one manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quizzes: Vec<QuizJob>,
}
