//! TOML quiz-set manifest parser.
//!
//! Loads quiz sets from TOML files and directories, and validates them.
//! Relative `source_file` and `terms_file` paths resolve against the
//! manifest's own directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builder::DEFAULT_MAX_OCCURRENCES_PER_TERM;
use crate::model::{Difficulty, QuizJob, QuizSet, QuizSource, QuizStyle, Term, TermsSpec};

/// Intermediate TOML structure for parsing manifest files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz_set: TomlQuizSetHeader,
    #[serde(default)]
    quizzes: Vec<TomlQuiz>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_difficulty: Option<String>,
    #[serde(default)]
    default_style: Option<String>,
    #[serde(default)]
    max_occurrences_per_term: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    name: String,
    #[serde(default)]
    source_file: Option<PathBuf>,
    #[serde(default)]
    source_text: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    max_occurrences_per_term: Option<usize>,
    #[serde(default)]
    terms_file: Option<PathBuf>,
    #[serde(default)]
    terms: Option<Vec<Term>>,
}

/// Defaults applied to quizzes that don't override them.
#[derive(Debug, Clone, Copy)]
pub struct ManifestDefaults {
    pub difficulty: Difficulty,
    pub style: QuizStyle,
    pub max_occurrences_per_term: usize,
}

impl Default for ManifestDefaults {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            style: QuizStyle::default(),
            max_occurrences_per_term: DEFAULT_MAX_OCCURRENCES_PER_TERM,
        }
    }
}

/// Parse a single TOML manifest into a `QuizSet`.
pub fn parse_quiz_set(path: &Path, defaults: ManifestDefaults) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;

    parse_quiz_set_str(&content, path, defaults)
}

/// Parse a TOML string into a `QuizSet` (useful for testing).
pub fn parse_quiz_set_str(
    content: &str,
    source_path: &Path,
    defaults: ManifestDefaults,
) -> Result<QuizSet> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let base_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
    let resolve = |p: PathBuf| if p.is_absolute() { p } else { base_dir.join(p) };

    let header = parsed.quiz_set;
    let set_difficulty = match header.default_difficulty {
        Some(d) => d.parse()?,
        None => defaults.difficulty,
    };
    let set_style = match header.default_style {
        Some(s) => s.parse()?,
        None => defaults.style,
    };
    let set_max = header
        .max_occurrences_per_term
        .unwrap_or(defaults.max_occurrences_per_term);

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|q| {
            let source = match (q.source_file, q.source_text) {
                (Some(file), None) => QuizSource::File(resolve(file)),
                (None, Some(text)) => QuizSource::Text(text),
                (Some(_), Some(_)) => anyhow::bail!(
                    "quiz '{}' sets both source_file and source_text",
                    q.name
                ),
                (None, None) => {
                    anyhow::bail!("quiz '{}' needs source_file or source_text", q.name)
                }
            };

            let terms = match (q.terms, q.terms_file) {
                (Some(_), Some(_)) => {
                    anyhow::bail!("quiz '{}' sets both terms and terms_file", q.name)
                }
                (Some(terms), None) => TermsSpec::Inline(terms),
                (None, Some(file)) => TermsSpec::File(resolve(file)),
                (None, None) => TermsSpec::FromSource,
            };

            let difficulty = q
                .difficulty
                .map(|d| d.parse::<Difficulty>())
                .transpose()?
                .unwrap_or(set_difficulty);
            let style = q
                .style
                .map(|s| s.parse::<QuizStyle>())
                .transpose()?
                .unwrap_or(set_style);

            Ok(QuizJob {
                name: q.name,
                source,
                terms,
                difficulty,
                style,
                max_occurrences_per_term: q.max_occurrences_per_term.unwrap_or(set_max),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizSet {
        id: header.id,
        name: header.name,
        description: header.description,
        quizzes,
    })
}

/// Recursively load all `.toml` manifests from a directory.
pub fn load_manifest_directory(dir: &Path, defaults: ManifestDefaults) -> Result<Vec<QuizSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_manifest_directory(&path, defaults)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_set(&path, defaults) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Load a manifest file, or every manifest under a directory.
pub fn load_manifests(path: &Path, defaults: ManifestDefaults) -> Result<Vec<QuizSet>> {
    if path.is_dir() {
        load_manifest_directory(path, defaults)
    } else {
        Ok(vec![parse_quiz_set(path, defaults)?])
    }
}

/// Whether `name` can be used as a file stem on every platform we write to.
pub fn is_safe_quiz_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control())
}

/// A warning from quiz-set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The quiz name (if applicable).
    pub quiz: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz set for common issues.
pub fn validate_quiz_set(set: &QuizSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |quiz: &QuizJob, message: String| ValidationWarning {
        quiz: Some(quiz.name.clone()),
        message,
    };

    if set.quizzes.is_empty() {
        warnings.push(ValidationWarning {
            quiz: None,
            message: "quiz set has no quizzes".into(),
        });
    }

    let mut seen = HashSet::new();
    for quiz in &set.quizzes {
        if !seen.insert(quiz.name.as_str()) {
            warnings.push(warn(quiz, format!("duplicate quiz name: {}", quiz.name)));
        }
        if !is_safe_quiz_name(&quiz.name) {
            warnings.push(warn(quiz, "name is not usable as a file name".into()));
        }
        if quiz.max_occurrences_per_term == 0 {
            warnings.push(warn(quiz, "max_occurrences_per_term must be at least 1".into()));
        }

        match &quiz.source {
            QuizSource::Text(text) if text.trim().is_empty() => {
                warnings.push(warn(quiz, "source_text is empty".into()));
            }
            QuizSource::File(path) if !path.exists() => {
                warnings.push(warn(
                    quiz,
                    format!("source_file not found: {}", path.display()),
                ));
            }
            _ => {}
        }

        match &quiz.terms {
            TermsSpec::Inline(terms) if terms.iter().all(|t| t.word.trim().is_empty()) => {
                warnings.push(warn(quiz, "inline term list has no usable words".into()));
            }
            TermsSpec::File(path) if !path.exists() => {
                warnings.push(warn(
                    quiz,
                    format!("terms_file not found: {}", path.display()),
                ));
            }
            TermsSpec::FromSource => {
                warnings.push(warn(
                    quiz,
                    "no terms or terms_file given; the configured term source will be asked"
                        .into(),
                ));
            }
            _ => {}
        }
    }

    warnings
}
