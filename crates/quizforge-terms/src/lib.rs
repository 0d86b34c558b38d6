//! quizforge-terms: term sources and configuration.
//!
//! Implements the `TermSource` trait for saved selection responses on disk
//! and for tests, and loads the `quizforge.toml` configuration.

pub mod config;
pub mod directory;
pub mod mock;

pub use config::{
    create_term_source, load_config, load_config_from, QuizforgeConfig, TermSourceConfig,
};
pub use directory::DirectoryTermSource;
pub use mock::MockTermSource;
