use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

use crate::matching::AnswerMatcher;
use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("need {needed} distractors for multiple choice, only {available} available")]
    InsufficientDistractors { needed: usize, available: usize },
}

//
// ─── QUESTION TYPE ─────────────────────────────────────────────────────────────
//

/// The kind of quiz the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuestionType {
    /// Typed answer, scored by similarity.
    #[default]
    OpenAnswer,
    /// Pick one of several names, scored by equality.
    MultipleChoice,
}

impl QuestionType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::OpenAnswer => "Open answer",
            QuestionType::MultipleChoice => "Multiple choice",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a question type from its display name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown question type: {raw:?}")]
pub struct ParseQuestionTypeError {
    raw: String,
}

impl FromStr for QuestionType {
    type Err = ParseQuestionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Open answer" => Ok(QuestionType::OpenAnswer),
            "Multiple choice" => Ok(QuestionType::MultipleChoice),
            other => Err(ParseQuestionTypeError {
                raw: other.to_string(),
            }),
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single trivia item: "which location is this?".
///
/// Immutable once built. Equality and hashing use the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    category: String,
    prompt: String,
    answer: String,
    hint: String,
    question_type: QuestionType,
    matcher: AnswerMatcher,
    all_options: BTreeSet<String>,
}

impl Question {
    /// Create a question. `all_options` is the candidate set distractors are drawn from;
    /// it may or may not contain `answer`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: QuestionId,
        category: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        hint: impl Into<String>,
        question_type: QuestionType,
        matcher: AnswerMatcher,
        all_options: BTreeSet<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            prompt: prompt.into(),
            answer: answer.into(),
            hint: hint.into(),
            question_type,
            matcher,
            all_options,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn matcher(&self) -> AnswerMatcher {
        self.matcher
    }

    #[must_use]
    pub fn all_options(&self) -> &BTreeSet<String> {
        &self.all_options
    }

    /// Number of options other than the answer.
    #[must_use]
    pub fn distractor_count(&self) -> usize {
        self.distractors().count()
    }

    fn distractors(&self) -> impl Iterator<Item = &String> {
        self.all_options.iter().filter(|o| **o != self.answer)
    }

    /// Returns true when `candidate` is accepted for this question.
    #[must_use]
    pub fn check_answer(&self, candidate: &str) -> bool {
        self.matcher.matches(&self.answer, candidate)
    }

    /// Build `n` shuffled options: the answer plus `n - 1` distinct distractors.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InsufficientDistractors` if the candidate set is too small.
    pub fn generate_multiple_choice_options<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, QuestionError> {
        let distractors: Vec<&String> = self.distractors().collect();
        let needed = n.saturating_sub(1);
        if distractors.len() < needed {
            return Err(QuestionError::InsufficientDistractors {
                needed,
                available: distractors.len(),
            });
        }

        let mut options: Vec<String> = index::sample(rng, distractors.len(), needed)
            .into_iter()
            .map(|i| distractors[i].clone())
            .collect();
        if n > 0 {
            options.push(self.answer.clone());
        }
        options.shuffle(rng);
        Ok(options)
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn streets() -> BTreeSet<String> {
        ["Coolsingel", "Blaak", "Lijnbaan", "Meent", "Witte de Withstraat"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn build_question(question_type: QuestionType, matcher: AnswerMatcher) -> Question {
        Question::new(
            QuestionId::new(0, 0),
            "streets",
            "Which street is highlighted on the map?",
            "Coolsingel",
            "Main boulevard past the city hall.",
            question_type,
            matcher,
            streets(),
        )
    }

    #[test]
    fn fuzzy_question_accepts_near_misses() {
        let q = build_question(QuestionType::OpenAnswer, AnswerMatcher::fuzzy(80.0));
        assert!(q.check_answer("Coolsingel"));
        assert!(q.check_answer("Koolsingel"));
        assert!(!q.check_answer("Blaak"));
    }

    #[test]
    fn exact_question_requires_equality() {
        let q = build_question(QuestionType::MultipleChoice, AnswerMatcher::exact());
        assert!(q.check_answer("Coolsingel"));
        assert!(!q.check_answer("Koolsingel"));
    }

    #[test]
    fn multiple_choice_options_contain_answer_and_distinct_distractors() {
        let q = build_question(QuestionType::MultipleChoice, AnswerMatcher::exact());
        let mut rng = StdRng::seed_from_u64(7);
        let options = q.generate_multiple_choice_options(4, &mut rng).unwrap();

        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| *o == "Coolsingel").count(), 1);
        let unique: HashSet<_> = options.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(options.iter().all(|o| q.all_options().contains(o)));
    }

    #[test]
    fn multiple_choice_fails_without_enough_distractors() {
        let q = build_question(QuestionType::MultipleChoice, AnswerMatcher::exact());
        let mut rng = StdRng::seed_from_u64(7);
        let err = q.generate_multiple_choice_options(6, &mut rng).unwrap_err();
        assert_eq!(
            err,
            QuestionError::InsufficientDistractors {
                needed: 5,
                available: 4
            }
        );
    }

    #[test]
    fn questions_compare_by_id() {
        let a = build_question(QuestionType::OpenAnswer, AnswerMatcher::fuzzy(80.0));
        let b = Question::new(
            QuestionId::new(0, 0),
            "squares",
            "other",
            "Other",
            "",
            QuestionType::MultipleChoice,
            AnswerMatcher::exact(),
            BTreeSet::new(),
        );
        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn question_type_parses_display_names() {
        assert_eq!(
            "Open answer".parse::<QuestionType>().unwrap(),
            QuestionType::OpenAnswer
        );
        assert_eq!(
            "Multiple choice".parse::<QuestionType>().unwrap(),
            QuestionType::MultipleChoice
        );
        assert!("Essay".parse::<QuestionType>().is_err());
        assert_eq!(QuestionType::MultipleChoice.to_string(), "Multiple choice");
    }
}
