//! Batch quiz pipeline.
//!
//! Runs many quiz jobs with bounded parallelism. Each job loads its source
//! text, obtains candidate terms (inline, from a saved selection file, or
//! from a [`TermSource`] with retries), then hands both to the synchronous
//! [`QuizBuilder`]. A failing job never aborts its siblings.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::builder::{BuilderConfig, QuizBuilder};
use crate::error::TermSourceError;
use crate::model::{BuildResult, Paragraph, QuizJob, QuizSource, QuizStyle, Term, TermsSpec};
use crate::selection::{parse_selection_response, TermSelection};
use crate::traits::{SelectionRequest, TermSource};

/// Upper bound for the exponential retry backoff.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum quizzes generated concurrently.
    pub parallelism: usize,
    /// Retries on transient term-source errors.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub retry_delay: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_quiz_start(&self, name: &str);
    fn on_quiz_complete(&self, quiz: &GeneratedQuiz);
    fn on_quiz_error(&self, name: &str, error: &str);
    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_quiz_start(&self, _: &str) {}
    fn on_quiz_complete(&self, _: &GeneratedQuiz) {}
    fn on_quiz_error(&self, _: &str, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// A finished quiz, ready for rendering and persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuiz {
    pub name: String,
    pub style: QuizStyle,
    /// Number of candidate terms the builder was given.
    pub terms_offered: usize,
    pub result: BuildResult,
    pub paragraphs: Vec<Paragraph>,
}

/// A job that could not be completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Completed quizzes, in job order.
    pub quizzes: Vec<GeneratedQuiz>,
    pub failures: Vec<QuizFailure>,
    pub duration_ms: u64,
}

/// The quiz pipeline.
pub struct QuizPipeline {
    source: Option<Arc<dyn TermSource>>,
    config: PipelineConfig,
}

impl QuizPipeline {
    /// `source` is only consulted for jobs whose terms are [`TermsSpec::FromSource`].
    pub fn new(source: Option<Arc<dyn TermSource>>, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    /// Generate every job, at most `parallelism` at a time.
    pub async fn run(&self, jobs: &[QuizJob], progress: &dyn ProgressReporter) -> Result<BatchReport> {
        anyhow::ensure!(self.config.parallelism >= 1, "parallelism must be at least 1");

        let start = Instant::now();
        let started_at = Utc::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));

        let mut futures = FuturesUnordered::new();
        for (index, job) in jobs.iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            futures.push(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        progress.on_quiz_start(&job.name);
                        self.generate(job).await
                    }
                    Err(_) => Err(anyhow::anyhow!("semaphore closed")),
                };
                (index, job.name.clone(), outcome)
            });
        }

        let total = futures.len();
        let mut quizzes = Vec::new();
        let mut failures = Vec::new();

        while let Some((index, name, outcome)) = futures.next().await {
            match outcome {
                Ok(quiz) => {
                    progress.on_quiz_complete(&quiz);
                    quizzes.push((index, quiz));
                }
                Err(e) => {
                    tracing::error!("quiz '{name}' failed: {e:#}");
                    let error = format!("{e:#}");
                    progress.on_quiz_error(&name, &error);
                    failures.push((index, QuizFailure { name, error }));
                }
            }
        }

        quizzes.sort_by_key(|(index, _)| *index);
        failures.sort_by_key(|(index, _)| *index);

        let elapsed = start.elapsed();
        progress.on_batch_complete(total, quizzes.len(), failures.len(), elapsed);

        Ok(BatchReport {
            run_id,
            started_at,
            quizzes: quizzes.into_iter().map(|(_, q)| q).collect(),
            failures: failures.into_iter().map(|(_, f)| f).collect(),
            duration_ms: elapsed.as_millis() as u64,
        })
    }

    /// Generate a single quiz.
    pub async fn generate(&self, job: &QuizJob) -> Result<GeneratedQuiz> {
        let source_text = load_source(&job.source).await?;
        let terms = self.obtain_terms(job, &source_text).await?;

        let builder = QuizBuilder::new(BuilderConfig {
            difficulty: job.difficulty,
            max_occurrences_per_term: job.max_occurrences_per_term,
        });
        let result = builder
            .build(&source_text, &terms)
            .with_context(|| format!("failed to build quiz '{}'", job.name))?;
        let paragraphs = result.paragraphs();

        tracing::info!(
            "built quiz '{}': {} blanks ({}% of words)",
            job.name,
            result.metadata.total_blanks,
            result.metadata.coverage_percentage
        );

        Ok(GeneratedQuiz {
            name: job.name.clone(),
            style: job.style,
            terms_offered: terms.len(),
            result,
            paragraphs,
        })
    }

    async fn obtain_terms(&self, job: &QuizJob, source_text: &str) -> Result<Vec<Term>> {
        match &job.terms {
            TermsSpec::Inline(terms) => Ok(terms.clone()),
            TermsSpec::File(path) => {
                let content = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read terms file: {}", path.display()))?;
                let selection = parse_selection_response(&content)
                    .with_context(|| format!("failed to parse terms file: {}", path.display()))?;
                Ok(selection.into_terms())
            }
            TermsSpec::FromSource => {
                let Some(source) = &self.source else {
                    anyhow::bail!(
                        "quiz '{}' has no terms and no term source is configured",
                        job.name
                    );
                };
                let request = SelectionRequest {
                    quiz_name: job.name.clone(),
                    source_text: source_text.to_string(),
                    difficulty: job.difficulty,
                };
                let selection = select_with_retry(source.as_ref(), &request, &self.config).await?;
                Ok(selection.into_terms())
            }
        }
    }
}

async fn load_source(source: &QuizSource) -> Result<String> {
    match source {
        QuizSource::Text(text) => Ok(text.clone()),
        QuizSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read source file: {}", path.display())),
    }
}

/// Ask `source` for terms, retrying transient failures with exponential
/// backoff. Permanent [`TermSourceError`]s are returned immediately.
pub async fn select_with_retry(
    source: &dyn TermSource,
    request: &SelectionRequest,
    config: &PipelineConfig,
) -> Result<TermSelection> {
    let mut last_error = None;
    let mut retry_delay = config.retry_delay;

    for retry in 0..=config.max_retries {
        if retry > 0 {
            tokio::time::sleep(retry_delay).await;
            retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
        }

        match source.select(request).await {
            Ok(selection) => return Ok(selection),
            Err(e) => {
                if let Some(source_err) = e.downcast_ref::<TermSourceError>() {
                    if source_err.is_permanent() {
                        return Err(e);
                    }
                    if let Some(ms) = source_err.retry_after_ms() {
                        retry_delay = Duration::from_millis(ms);
                    }
                }
                tracing::warn!(
                    "term source '{}' failed for '{}' (attempt {}): {e:#}",
                    source.name(),
                    request.quiz_name,
                    retry + 1
                );
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("term source returned no result")))
}
