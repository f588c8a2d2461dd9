mod plan;
mod progress;
mod selection;
mod service;
mod tracker;

// Public API of the session subsystem.
pub use crate::error::QuizError;
pub use plan::QuizBuilder;
pub use progress::{QuizProgress, QuizStatistics};
pub use selection::select_candidate;
pub use service::{AskedQuestion, QuizSession, QuizStatus};
