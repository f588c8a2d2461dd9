#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use error::{ConfigurationError, QuizError};

pub use sessions::{
    AskedQuestion, QuizBuilder, QuizProgress, QuizSession, QuizStatistics, QuizStatus,
    select_candidate,
};
