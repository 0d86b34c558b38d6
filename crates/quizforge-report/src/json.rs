//! JSON dump of a build result.

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::pipeline::GeneratedQuiz;

/// Pretty-printed `{ quiz_text, answer_key, metadata }`.
pub fn render_json(quiz: &GeneratedQuiz) -> Result<String> {
    serde_json::to_string_pretty(&quiz.result).context("failed to serialize build result")
}

pub fn write_json(quiz: &GeneratedQuiz, path: &Path) -> Result<()> {
    let json = render_json(quiz)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample_quiz;
    use quizforge_core::model::{BuildResult, QuizStyle};

    #[test]
    fn dump_reads_back_as_build_result() {
        let quiz = sample_quiz(QuizStyle::FullPage);
        let json = render_json(&quiz).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["total_blanks"], 2);
        assert_eq!(value["answer_key"][0]["answer"], "mitochondria");

        let back: BuildResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.quiz_text, quiz.result.quiz_text);
    }
}
