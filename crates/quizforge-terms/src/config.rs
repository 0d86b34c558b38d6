//! Configuration loading and term-source factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::builder::DEFAULT_MAX_OCCURRENCES_PER_TERM;
use quizforge_core::manifest::ManifestDefaults;
use quizforge_core::model::{Difficulty, QuizStyle};
use quizforge_core::pipeline::PipelineConfig;
use quizforge_core::record::QuizStore;
use quizforge_core::traits::TermSource;

use crate::directory::DirectoryTermSource;

/// Where candidate terms come from when a quiz doesn't list its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TermSourceConfig {
    /// Saved selection responses named `<quiz name>.json` or `.txt`.
    Directory { dir: PathBuf },
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Root for quiz records and rendered sheets.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Difficulty for quizzes that don't specify one.
    #[serde(default)]
    pub default_difficulty: Difficulty,
    /// Layout for quizzes that don't specify one.
    #[serde(default)]
    pub default_style: QuizStyle,
    /// Blanks per term, at most.
    #[serde(default = "default_max_occurrences")]
    pub max_occurrences_per_term: usize,
    /// Max concurrent quiz builds.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Max retries on term-source errors.
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Term source for quizzes without terms of their own.
    #[serde(default)]
    pub term_source: Option<TermSourceConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./quizforge-data")
}
fn default_max_occurrences() -> usize {
    DEFAULT_MAX_OCCURRENCES_PER_TERM
}
fn default_parallelism() -> usize {
    4
}
fn default_retries() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_difficulty: Difficulty::default(),
            default_style: QuizStyle::default(),
            max_occurrences_per_term: default_max_occurrences(),
            parallelism: default_parallelism(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            term_source: None,
        }
    }
}

impl QuizforgeConfig {
    /// Defaults applied to manifest entries.
    pub fn manifest_defaults(&self) -> ManifestDefaults {
        ManifestDefaults {
            difficulty: self.default_difficulty,
            style: self.default_style,
            max_occurrences_per_term: self.max_occurrences_per_term,
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            parallelism: self.parallelism,
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn store(&self) -> QuizStore {
        QuizStore::new(&self.data_dir)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        search_from = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable override: `QUIZFORGE_DATA_DIR`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizforgeConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZFORGE_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    config.data_dir = resolve_path(&config.data_dir);
    if let Some(TermSourceConfig::Directory { dir }) = &mut config.term_source {
        *dir = resolve_path(dir);
    }

    anyhow::ensure!(
        config.max_occurrences_per_term >= 1,
        "max_occurrences_per_term must be at least 1"
    );
    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Create a term source instance from its configuration.
pub fn create_term_source(config: &TermSourceConfig) -> Box<dyn TermSource> {
    match config {
        TermSourceConfig::Directory { dir } => Box::new(DirectoryTermSource::new(dir.clone())),
    }
}
