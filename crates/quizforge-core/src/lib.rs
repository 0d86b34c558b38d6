//! quizforge-core: deterministic cloze quiz-building engine.
//!
//! This crate defines the data model, the quiz-building engine (occurrence
//! finding, overlap resolution, blank generation, text assembly, paragraph
//! segmentation, metadata), and the async pipeline that feeds it.

pub mod assembler;
pub mod blank;
pub mod builder;
pub mod error;
pub mod finder;
pub mod manifest;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod record;
pub mod resolver;
pub mod segment;
pub mod selection;
pub mod traits;

pub use builder::{BuilderConfig, QuizBuilder};
pub use error::{QuizError, TermSourceError};
pub use model::{AnswerKeyEntry, BuildResult, Difficulty, Paragraph, QuizMetadata, QuizStyle, Term};
