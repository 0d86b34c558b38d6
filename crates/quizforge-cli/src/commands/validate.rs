//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::manifest::{load_manifests, validate_quiz_set, ManifestDefaults};

pub fn execute(manifest_path: PathBuf) -> Result<()> {
    let sets = load_manifests(&manifest_path, ManifestDefaults::default())?;

    let mut total_warnings = 0;

    for set in &sets {
        println!("Quiz set: {} ({} quizzes)", set.name, set.quizzes.len());

        let warnings = validate_quiz_set(set);
        for w in &warnings {
            let prefix = w
                .quiz
                .as_ref()
                .map(|name| format!("  [{name}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quiz sets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
