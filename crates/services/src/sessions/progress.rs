use serde::Serialize;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub total: usize,
    pub remaining: usize,
    pub skipped: usize,
    pub is_finished: bool,
}

/// End-of-quiz score summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizStatistics {
    pub n_questions: usize,
    pub n_correct_answers: usize,
    pub n_first_try: usize,
    pub n_revealed: usize,
}
