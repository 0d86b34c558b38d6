//! Persisted quiz records.
//!
//! Every generated quiz leaves a small JSON record under
//! `<data_dir>/quiz_metadata/`, and its rendered sheets under
//! `<data_dir>/quizzes/`. Quiz names are unique within a data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::manifest::is_safe_quiz_name;
use crate::model::{Difficulty, QuizStyle};
use crate::pipeline::GeneratedQuiz;

/// Record format version.
pub const RECORD_VERSION: &str = "3.0";
/// Terms are chosen by a selection stage and the quiz is built locally.
pub const GENERATION_METHOD: &str = "llm_selection_local_building";

const METADATA_DIR: &str = "quiz_metadata";
const QUIZZES_DIR: &str = "quizzes";

/// Summary of a generated quiz, kept alongside its rendered sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: Uuid,
    pub name: String,
    pub difficulty: Difficulty,
    pub quiz_style: QuizStyle,
    pub generated_at: DateTime<Utc>,
    pub num_paragraphs: usize,
    pub num_blanks: usize,
    pub version: String,
    pub generation_method: String,
    pub coverage_percentage: f64,
    pub original_word_count: usize,
}

impl QuizRecord {
    /// Record a freshly generated quiz, stamped with the current time.
    pub fn from_generated(quiz: &GeneratedQuiz) -> Self {
        let metadata = &quiz.result.metadata;
        Self {
            id: Uuid::new_v4(),
            name: quiz.name.clone(),
            difficulty: metadata.difficulty,
            quiz_style: quiz.style,
            generated_at: Utc::now(),
            num_paragraphs: quiz.paragraphs.len(),
            num_blanks: quiz.result.answer_key.len(),
            version: RECORD_VERSION.to_string(),
            generation_method: GENERATION_METHOD.to_string(),
            coverage_percentage: metadata.coverage_percentage,
            original_word_count: metadata.original_word_count,
        }
    }
}

/// File-backed store of quiz records rooted at a data directory.
#[derive(Debug, Clone)]
pub struct QuizStore {
    root: PathBuf,
}

impl QuizStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding rendered quiz sheets.
    pub fn quizzes_dir(&self) -> PathBuf {
        self.root.join(QUIZZES_DIR)
    }

    fn metadata_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    /// Names that would leave the metadata directory are refused.
    fn record_path(&self, name: &str) -> Result<PathBuf> {
        anyhow::ensure!(
            is_safe_quiz_name(name),
            "quiz name '{name}' is not usable as a file name"
        );
        Ok(self.metadata_dir().join(format!("{name}.json")))
    }

    /// Whether a quiz with this name has already been generated.
    pub fn exists(&self, name: &str) -> bool {
        self.record_path(name).is_ok_and(|path| path.exists())
    }

    /// Fail if `name` is unusable or already taken.
    pub fn ensure_available(&self, name: &str) -> Result<()> {
        if self.record_path(name)?.exists() {
            anyhow::bail!("quiz '{name}' already exists in {}", self.root.display());
        }
        Ok(())
    }

    /// Save a record as pretty JSON, creating directories as needed.
    pub fn save(&self, record: &QuizRecord) -> Result<PathBuf> {
        let dir = self.metadata_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let path = self.record_path(&record.name)?;
        let json = serde_json::to_string_pretty(record).context("failed to serialize record")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        Ok(path)
    }

    /// Load one record by quiz name.
    pub fn load(&self, name: &str) -> Result<QuizRecord> {
        let path = self.record_path(name)?;
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read record from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse record {}", path.display()))
    }

    /// All readable records, sorted by name. Unreadable files are skipped.
    pub fn list(&self) -> Result<Vec<QuizRecord>> {
        let dir = self.metadata_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read directory: {}", dir.display()))?
        {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let parsed = std::fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|c| serde_json::from_str::<QuizRecord>(&c).map_err(Into::into));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }

        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}
