//! Error types for bank construction and quiz sessions.
//!
//! Dropped records are not errors; these cover the cases a caller must see:
//! a mandatory source that could not be loaded, a bank with nothing in it,
//! and misuse of a quiz session.

use thiserror::Error;

/// Errors that abort a bank build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A mandatory source (base questions or sign inventory) failed to load.
    #[error("mandatory source '{name}' unavailable: {reason}")]
    MissingSource { name: String, reason: String },

    /// Every source loaded but no question survived normalization.
    #[error("question bank is empty after normalization")]
    EmptyBank,
}

impl BuildError {
    pub fn missing(name: impl Into<String>, reason: impl ToString) -> Self {
        BuildError::MissingSource {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors raised by [`crate::session::QuizState`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("category '{0}' has no questions")]
    EmptyCategory(String),

    /// The requested number of questions was zero.
    #[error("question count must be at least 1")]
    InvalidLimit,

    #[error("the current question was already answered")]
    AlreadyAnswered,

    #[error("answer the current question before moving on")]
    NotAnswered,

    #[error("'{0}' is not one of the options")]
    InvalidOption(String),

    #[error("the quiz is finished")]
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_message_names_source() {
        let err = BuildError::missing("base", "file not found");
        assert_eq!(
            err.to_string(),
            "mandatory source 'base' unavailable: file not found"
        );
    }
}
