//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, SettingsError};

/// Reasons a quiz cannot be built from the requested input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("number of questions needs to be at least 1")]
    TooFewQuestions,
    #[error("could not generate questions from location input")]
    NoQuestions,
    #[error("unknown question type: {0:?}")]
    UnknownQuestionType(String),
    #[error("category {category:?} holds more than {max} locations", max = u32::MAX)]
    CategoryTooLarge { category: String },
}

/// Errors emitted by quiz sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("invalid quiz configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
    #[error("quiz is finished")]
    SessionFinished,
    #[error("quiz has not been started")]
    NotStarted,
    #[error("quiz already started")]
    AlreadyStarted,
    #[error("no question is currently being asked")]
    NoCurrentQuestion,
    #[error("no questions remaining")]
    NoRemainingQuestions,
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
