//! quizbank-core — Question-bank normalization and quiz sessions.
//!
//! This crate turns raw question records, a sign inventory, and legal
//! definitions into a deduplicated, categorized [`model::Bank`], and drives
//! one-question-at-a-time quiz sessions over it.

pub mod assembly;
pub mod builder;
pub mod distractors;
pub mod error;
pub mod matching;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod random;
pub mod report;
pub mod session;

pub use builder::{build_bank, BankSources, BuilderConfig};
pub use error::{BuildError, QuizError};
pub use model::{Bank, Question};
