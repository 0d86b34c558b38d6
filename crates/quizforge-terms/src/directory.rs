//! Term source backed by saved selection responses.
//!
//! Looks for `<dir>/<quiz name>.json`, falling back to `<dir>/<quiz name>.txt`
//! for raw model replies pasted as-is.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use quizforge_core::error::TermSourceError;
use quizforge_core::selection::{parse_selection_response, TermSelection};
use quizforge_core::traits::{SelectionRequest, TermSource};

const EXTENSIONS: [&str; 2] = ["json", "txt"];

/// Reads term selections from a directory keyed by quiz name.
pub struct DirectoryTermSource {
    dir: PathBuf,
}

impl DirectoryTermSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Candidate file paths for a quiz, in lookup order.
    pub fn candidates(&self, quiz_name: &str) -> Vec<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{quiz_name}.{ext}")))
            .collect()
    }
}

#[async_trait]
impl TermSource for DirectoryTermSource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn select(&self, request: &SelectionRequest) -> anyhow::Result<TermSelection> {
        for path in self.candidates(&request.quiz_name) {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    tracing::debug!("reading term selection from {}", path.display());
                    return Ok(parse_selection_response(&content)?);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(TermSourceError::Unavailable(format!(
                        "{}: {e}",
                        path.display()
                    ))
                    .into())
                }
            }
        }

        Err(TermSourceError::NotFound(request.quiz_name.clone()).into())
    }
}
