use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use quiz_core::model::{Question, QuestionId, QuestionType, QuizSettings};

use super::progress::{QuizProgress, QuizStatistics};
use super::selection::select_candidate;
use super::tracker::QuestionTracker;
use crate::error::QuizError;

//
// ─── STATUS ────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a quiz. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizStatus {
    Initialized,
    InProgress,
    Finished,
}

impl fmt::Display for QuizStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            QuizStatus::Initialized => "Initialized",
            QuizStatus::InProgress => "In Progress",
            QuizStatus::Finished => "Finished",
        })
    }
}

//
// ─── ASKED QUESTION ────────────────────────────────────────────────────────────
//

/// The question currently put to the user, with the options drawn for this ask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AskedQuestion<'a> {
    question: &'a Question,
    options: &'a [String],
}

impl<'a> AskedQuestion<'a> {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.question.id()
    }

    #[must_use]
    pub fn question(&self) -> &'a Question {
        self.question
    }

    #[must_use]
    pub fn prompt(&self) -> &'a str {
        self.question.prompt()
    }

    #[must_use]
    pub fn hint(&self) -> &'a str {
        self.question.hint()
    }

    #[must_use]
    pub fn answer(&self) -> &'a str {
        self.question.answer()
    }

    /// Multiple-choice options; empty for open answer quizzes.
    #[must_use]
    pub fn options(&self) -> &'a [String] {
        self.options
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over a fixed pool of questions.
///
/// Questions are drawn at random, skipped ones last, avoiding the most recent draws. A
/// question leaves the quiz once it is answered correctly or its answer is revealed; the
/// quiz finishes as soon as none remain.
pub struct QuizSession {
    status: QuizStatus,
    question_type: QuestionType,
    settings: QuizSettings,
    pool: BTreeMap<QuestionId, Question>,
    tracker: QuestionTracker,
    current_options: Vec<String>,
    rng: StdRng,
}

impl QuizSession {
    pub(crate) fn from_parts(
        pool: BTreeMap<QuestionId, Question>,
        question_type: QuestionType,
        settings: QuizSettings,
        rng: StdRng,
    ) -> Self {
        let tracker = QuestionTracker::new(pool.keys().copied().collect());
        Self {
            status: QuizStatus::Initialized,
            question_type,
            settings,
            pool,
            tracker,
            current_options: Vec::new(),
            rng,
        }
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        self.status
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.pool.get(&id)
    }

    /// Pool ids in ascending order.
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.pool.keys().copied()
    }

    /// Ids in the order they were drawn, repeats included.
    #[must_use]
    pub fn history(&self) -> &[QuestionId] {
        self.tracker.history()
    }

    #[must_use]
    pub fn current(&self) -> Option<AskedQuestion<'_>> {
        let id = self.tracker.current()?;
        let question = self.pool.get(&id)?;
        Some(AskedQuestion {
            question,
            options: &self.current_options,
        })
    }

    #[must_use]
    pub fn n_questions_total(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn n_questions_remaining(&self) -> usize {
        self.tracker.n_remaining()
    }

    #[must_use]
    pub fn n_questions_skipped(&self) -> usize {
        self.tracker.n_skipped()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == QuizStatus::Finished
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.n_questions_total(),
            remaining: self.n_questions_remaining(),
            skipped: self.n_questions_skipped(),
            is_finished: self.is_finished(),
        }
    }

    #[must_use]
    pub fn statistics(&self) -> QuizStatistics {
        QuizStatistics {
            n_questions: self.n_questions_total(),
            n_correct_answers: self.tracker.n_correct(),
            n_first_try: self.tracker.n_first_try(),
            n_revealed: self.tracker.n_revealed(),
        }
    }

    /// Start the quiz and draw the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` if the quiz is in progress and
    /// `QuizError::SessionFinished` once it is finished.
    pub fn start(&mut self) -> Result<AskedQuestion<'_>, QuizError> {
        match self.status {
            QuizStatus::Initialized => {}
            QuizStatus::InProgress => return Err(QuizError::AlreadyStarted),
            QuizStatus::Finished => return Err(QuizError::SessionFinished),
        }
        self.status = QuizStatus::InProgress;
        tracing::info!(
            n_questions = self.pool.len(),
            question_type = %self.question_type,
            "quiz started"
        );
        self.ask_question()
    }

    /// Return the pending question, drawing a new one if none is pending.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::SessionFinished` / `QuizError::NotStarted` outside a running
    /// quiz, `QuizError::NoRemainingQuestions` if nothing can be drawn, and
    /// `QuizError::Question` if options cannot be generated.
    pub fn ask_question(&mut self) -> Result<AskedQuestion<'_>, QuizError> {
        self.ensure_active()?;
        if self.tracker.current().is_none() {
            self.ask_new_question()?;
        }
        self.finish_if_exhausted();
        self.current().ok_or(QuizError::NoCurrentQuestion)
    }

    fn ask_new_question(&mut self) -> Result<(), QuizError> {
        let remaining = self.tracker.remaining();
        let id = select_candidate(
            &remaining,
            self.tracker.skipped(),
            self.tracker.history(),
            self.settings.question_memory(),
            &mut self.rng,
        )
        .ok_or(QuizError::NoRemainingQuestions)?;
        let question = self.pool.get(&id).ok_or(QuizError::NoRemainingQuestions)?;

        let options = match self.question_type {
            QuestionType::MultipleChoice => question
                .generate_multiple_choice_options(self.settings.n_options(), &mut self.rng)?,
            QuestionType::OpenAnswer => Vec::new(),
        };

        tracing::debug!(question_id = %id, remaining = remaining.len(), "asking question");
        self.tracker.ask(id);
        self.current_options = options;
        Ok(())
    }

    /// Put the pending question aside; it is asked again once fresh questions run out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentQuestion` if nothing is pending.
    pub fn skip_question(&mut self) -> Result<(), QuizError> {
        let id = self.active_question_id()?;
        tracing::debug!(question_id = %id, "question skipped");
        self.tracker.mark_skipped(id);
        self.clear_current();
        self.finish_if_exhausted();
        Ok(())
    }

    /// Return the answer of the pending question.
    ///
    /// With `progress` the question is consumed and counted as revealed; without it this
    /// is a read-only peek.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentQuestion` if nothing is pending.
    pub fn reveal_answer(&mut self, progress: bool) -> Result<String, QuizError> {
        let id = self.active_question_id()?;
        let answer = self
            .pool
            .get(&id)
            .map(|q| q.answer().to_string())
            .ok_or(QuizError::NoCurrentQuestion)?;

        if progress {
            tracing::debug!(question_id = %id, "answer revealed");
            self.tracker.mark_revealed(id);
            self.clear_current();
        }
        self.finish_if_exhausted();
        Ok(answer)
    }

    /// Check `candidate` against the pending question.
    ///
    /// Wrong answers are always recorded and keep the question pending. A correct answer
    /// consumes the question only with `progress`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoCurrentQuestion` if nothing is pending.
    pub fn check_answer(&mut self, candidate: &str, progress: bool) -> Result<bool, QuizError> {
        let id = self.active_question_id()?;
        let is_correct = self
            .pool
            .get(&id)
            .map(|q| q.check_answer(candidate))
            .ok_or(QuizError::NoCurrentQuestion)?;

        if !is_correct {
            tracing::debug!(question_id = %id, "incorrect answer");
            self.tracker.mark_incorrect(id);
        } else if progress {
            tracing::debug!(question_id = %id, "correct answer");
            self.tracker.mark_correct(id);
            self.clear_current();
        }
        self.finish_if_exhausted();
        Ok(is_correct)
    }

    fn ensure_active(&self) -> Result<(), QuizError> {
        match self.status {
            QuizStatus::InProgress => Ok(()),
            QuizStatus::Initialized => Err(QuizError::NotStarted),
            QuizStatus::Finished => Err(QuizError::SessionFinished),
        }
    }

    fn active_question_id(&self) -> Result<QuestionId, QuizError> {
        self.ensure_active()?;
        self.tracker.current().ok_or(QuizError::NoCurrentQuestion)
    }

    fn clear_current(&mut self) {
        self.tracker.clear_current();
        self.current_options.clear();
    }

    // Runs after every state change.
    fn finish_if_exhausted(&mut self) {
        if self.status == QuizStatus::InProgress && self.tracker.n_remaining() == 0 {
            self.status = QuizStatus::Finished;
            self.clear_current();
            let stats = self.statistics();
            tracing::info!(
                n_questions = stats.n_questions,
                n_correct_answers = stats.n_correct_answers,
                n_first_try = stats.n_first_try,
                n_revealed = stats.n_revealed,
                "quiz finished"
            );
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("status", &self.status)
            .field("question_type", &self.question_type)
            .field("pool_len", &self.pool.len())
            .field("current", &self.tracker.current())
            .field("remaining", &self.tracker.n_remaining())
            .field("skipped", &self.tracker.n_skipped())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
