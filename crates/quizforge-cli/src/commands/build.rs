//! The `quizforge build` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use quizforge_core::manifest::is_safe_quiz_name;
use quizforge_core::model::{QuizJob, QuizSource, QuizStyle, TermsSpec};
use quizforge_core::pipeline::QuizPipeline;
use quizforge_core::traits::TermSource;
use quizforge_core::Difficulty;
use quizforge_report::SheetFormat;
use quizforge_terms::{create_term_source, load_config_from};

use super::output::{print_summary, save_quiz};

pub struct BuildArgs {
    pub source: PathBuf,
    pub terms: Option<PathBuf>,
    pub name: String,
    pub difficulty: Option<String>,
    pub max_occurrences: Option<usize>,
    pub style: Option<String>,
    pub format: String,
    pub config: Option<PathBuf>,
}

pub async fn execute(args: BuildArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    anyhow::ensure!(
        is_safe_quiz_name(&args.name),
        "quiz name '{}' is not usable as a file name",
        args.name
    );
    let difficulty = match &args.difficulty {
        Some(d) => d.parse::<Difficulty>()?,
        None => config.default_difficulty,
    };
    let style = match &args.style {
        Some(s) => s.parse::<QuizStyle>()?,
        None => config.default_style,
    };
    let max_occurrences = args
        .max_occurrences
        .unwrap_or(config.max_occurrences_per_term);
    anyhow::ensure!(max_occurrences >= 1, "max-occurrences must be at least 1");
    let formats = SheetFormat::parse_list(&args.format)?;

    let store = config.store();
    store.ensure_available(&args.name)?;

    let terms = match args.terms {
        Some(path) => TermsSpec::File(path),
        None => TermsSpec::FromSource,
    };
    let term_source: Option<Arc<dyn TermSource>> = config
        .term_source
        .as_ref()
        .map(|c| Arc::from(create_term_source(c)));

    let job = QuizJob {
        name: args.name,
        source: QuizSource::File(args.source),
        terms,
        difficulty,
        style,
        max_occurrences_per_term: max_occurrences,
    };

    let pipeline = QuizPipeline::new(term_source, config.pipeline_config());
    let quiz = pipeline.generate(&job).await?;

    print_summary(std::slice::from_ref(&quiz));
    for path in save_quiz(&store, &quiz, &formats)? {
        eprintln!("Wrote {}", path.display());
    }

    Ok(())
}
