//! The `quizforge run` command.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use quizforge_core::manifest::{is_safe_quiz_name, load_manifests};
use quizforge_core::model::QuizJob;
use quizforge_core::pipeline::{GeneratedQuiz, ProgressReporter, QuizPipeline};
use quizforge_core::traits::TermSource;
use quizforge_report::SheetFormat;
use quizforge_terms::{create_term_source, load_config_from};

use super::output::{print_summary, save_quiz};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_quiz_start(&self, name: &str) {
        eprintln!("  Starting: {name}");
    }

    fn on_quiz_complete(&self, quiz: &GeneratedQuiz) {
        let meta = &quiz.result.metadata;
        eprintln!(
            "  Done: {} [{}] {} blanks, {:.1}% coverage",
            quiz.name, meta.difficulty, meta.total_blanks, meta.coverage_percentage
        );
    }

    fn on_quiz_error(&self, name: &str, error: &str) {
        eprintln!("  ERROR: {name}: {error}");
    }

    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} succeeded, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    manifest_path: PathBuf,
    parallelism: Option<usize>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formats = SheetFormat::parse_list(&format)?;

    let mut pipeline_config = config.pipeline_config();
    if let Some(p) = parallelism {
        anyhow::ensure!(p >= 1, "parallelism must be at least 1");
        pipeline_config.parallelism = p;
    }

    let sets = load_manifests(&manifest_path, config.manifest_defaults())?;
    tracing::debug!(
        "loaded {} quiz set(s) from {}",
        sets.len(),
        manifest_path.display()
    );
    let jobs: Vec<QuizJob> = sets.into_iter().flat_map(|s| s.quizzes).collect();
    anyhow::ensure!(!jobs.is_empty(), "no quizzes found in {}", manifest_path.display());

    let store = config.store();
    let mut seen = HashSet::new();
    let mut rejected = 0;
    let mut runnable = Vec::new();
    for job in jobs {
        if !is_safe_quiz_name(&job.name) {
            eprintln!("  ERROR: {}: name is not usable as a file name", job.name);
            rejected += 1;
        } else if !seen.insert(job.name.clone()) {
            eprintln!("  ERROR: {}: duplicate quiz name in batch", job.name);
            rejected += 1;
        } else if store.exists(&job.name) {
            eprintln!("  ERROR: {}: quiz already exists", job.name);
            rejected += 1;
        } else {
            runnable.push(job);
        }
    }

    let term_source: Option<Arc<dyn TermSource>> = config
        .term_source
        .as_ref()
        .map(|c| Arc::from(create_term_source(c)));

    eprintln!(
        "quizforge v{} - building {} quizzes",
        env!("CARGO_PKG_VERSION"),
        runnable.len()
    );
    eprintln!();

    let pipeline = QuizPipeline::new(term_source, pipeline_config);
    let report = pipeline.run(&runnable, &ConsoleReporter).await?;

    if !report.quizzes.is_empty() {
        print_summary(&report.quizzes);
    }

    let mut write_errors = 0;
    for quiz in &report.quizzes {
        match save_quiz(&store, quiz, &formats) {
            Ok(paths) => {
                for path in paths {
                    eprintln!("Wrote {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("  ERROR: {}: {e:#}", quiz.name);
                write_errors += 1;
            }
        }
    }

    let failed = rejected + report.failures.len() + write_errors;
    if failed > 0 {
        anyhow::bail!("{failed} quiz(zes) failed");
    }
    Ok(())
}
