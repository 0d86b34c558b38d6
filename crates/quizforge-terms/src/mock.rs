//! Mock term source for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizforge_core::error::TermSourceError;
use quizforge_core::model::Term;
use quizforge_core::selection::TermSelection;
use quizforge_core::traits::{SelectionRequest, TermSource};

/// A mock term source for exercising the pipeline without a real selector.
///
/// Returns configured terms per quiz name and can fail its first calls with a
/// transient error.
pub struct MockTermSource {
    /// Map of quiz name → terms.
    selections: HashMap<String, Vec<Term>>,
    /// Terms for quizzes not in the map.
    default_terms: Vec<Term>,
    /// Calls that fail with a timeout before any succeed.
    failures_before_success: u32,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<SelectionRequest>>,
}

impl MockTermSource {
    /// Create a mock with per-quiz term lists.
    pub fn new(selections: HashMap<String, Vec<Term>>) -> Self {
        Self {
            selections,
            default_terms: Vec::new(),
            failures_before_success: 0,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that returns the same terms for every quiz.
    pub fn with_fixed_terms(terms: Vec<Term>) -> Self {
        Self {
            default_terms: terms,
            ..Self::new(HashMap::new())
        }
    }

    /// Fail the first `n` calls with a transient timeout.
    pub fn failing_first(mut self, n: u32) -> Self {
        self.failures_before_success = n;
        self
    }

    /// Get the number of calls made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this source.
    pub fn last_request(&self) -> Option<SelectionRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TermSource for MockTermSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn select(&self, request: &SelectionRequest) -> anyhow::Result<TermSelection> {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        if call < self.failures_before_success {
            return Err(TermSourceError::Timeout(30).into());
        }

        let terms = self
            .selections
            .get(&request.quiz_name)
            .unwrap_or(&self.default_terms)
            .clone();
        Ok(TermSelection::from_terms(terms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use quizforge_core::model::{Difficulty, QuizJob, QuizSource, QuizStyle, TermsSpec};
    use quizforge_core::pipeline::{NoopReporter, PipelineConfig, QuizPipeline};

    fn request(name: &str) -> SelectionRequest {
        SelectionRequest {
            quiz_name: name.into(),
            source_text: "anything".into(),
            difficulty: Difficulty::Hard,
        }
    }

    #[tokio::test]
    async fn per_quiz_selection() {
        let mut selections = HashMap::new();
        selections.insert(
            "cells".to_string(),
            vec![Term::new("nucleus", 0.9, "key_concept")],
        );
        let source = MockTermSource::new(selections);

        let hit = source.select(&request("cells")).await.unwrap();
        assert_eq!(hit.terms()[0].word, "nucleus");

        let miss = source.select(&request("other")).await.unwrap();
        assert!(miss.terms().is_empty());
        assert_eq!(source.call_count(), 2);
        assert_eq!(source.last_request().unwrap().quiz_name, "other");
    }

    #[tokio::test(start_paused = true)]
    async fn pipeline_retries_through_mock() {
        let source = Arc::new(
            MockTermSource::with_fixed_terms(vec![Term::new("cat", 0.5, "vocabulary")])
                .failing_first(2),
        );
        let shared: Arc<dyn TermSource> = source.clone();
        let pipeline = QuizPipeline::new(
            Some(shared),
            PipelineConfig {
                parallelism: 1,
                max_retries: 3,
                retry_delay: Duration::from_millis(10),
            },
        );
        let jobs = vec![QuizJob {
            name: "pets".into(),
            source: QuizSource::Text("The cat sat.".into()),
            terms: TermsSpec::FromSource,
            difficulty: Difficulty::Hard,
            style: QuizStyle::FullPage,
            max_occurrences_per_term: 2,
        }];

        let report = pipeline.run(&jobs, &NoopReporter).await.unwrap();
        assert!(report.failures.is_empty());
        assert_eq!(report.quizzes[0].result.quiz_text, "The c____ sat.");
        assert_eq!(source.call_count(), 3);
        assert_eq!(source.last_request().unwrap().difficulty, Difficulty::Hard);
    }
}
