use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;
use std::collections::{BTreeMap, BTreeSet};

use quiz_core::model::{
    LocationCatalogue, Question, QuestionError, QuestionId, QuestionType, QuizSettings,
};

use super::service::QuizSession;
use crate::error::{ConfigurationError, QuizError};

/// Builds a quiz by generating one question per catalogue location and sampling a pool.
#[derive(Debug, Clone)]
pub struct QuizBuilder<'a> {
    catalogue: &'a LocationCatalogue,
    question_type: QuestionType,
    categories: Vec<String>,
    n_questions: Option<usize>,
    settings: QuizSettings,
    seed: Option<u64>,
}

impl<'a> QuizBuilder<'a> {
    /// Start a builder over `catalogue`: open answer, `streets` only, full pool.
    #[must_use]
    pub fn new(catalogue: &'a LocationCatalogue) -> Self {
        Self {
            catalogue,
            question_type: QuestionType::default(),
            categories: vec!["streets".to_string()],
            n_questions: None,
            settings: QuizSettings::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn question_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = question_type;
        self
    }

    /// Set the question type from its display name (`"Open answer"`, `"Multiple choice"`).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfiguration` for unknown names.
    pub fn question_mode(self, mode: &str) -> Result<Self, QuizError> {
        let question_type = mode
            .parse::<QuestionType>()
            .map_err(|_| ConfigurationError::UnknownQuestionType(mode.to_string()))?;
        Ok(self.question_type(question_type))
    }

    /// Categories questions are generated from; others are ignored.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Target pool size; clamped to the number of generated questions.
    #[must_use]
    pub fn n_questions(mut self, n: usize) -> Self {
        self.n_questions = Some(n);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed the random source for reproducible sampling and selection.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generate, sample and validate the question pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidConfiguration` if fewer than one question is requested
    /// or none can be generated, and `QuizError::Question` if multiple choice lacks
    /// distractors.
    pub fn build(self) -> Result<QuizSession, QuizError> {
        if self.n_questions == Some(0) {
            return Err(ConfigurationError::TooFewQuestions.into());
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let generated = self.generate_questions()?;
        if generated.is_empty() {
            return Err(ConfigurationError::NoQuestions.into());
        }
        let n_generated = generated.len();

        let pool: BTreeMap<QuestionId, Question> = match self.n_questions {
            Some(n) if n < generated.len() => {
                let ids: Vec<QuestionId> = generated.keys().copied().collect();
                let keep: BTreeSet<QuestionId> = index::sample(&mut rng, ids.len(), n)
                    .into_iter()
                    .map(|i| ids[i])
                    .collect();
                generated
                    .into_iter()
                    .filter(|(id, _)| keep.contains(id))
                    .collect()
            }
            _ => generated,
        };

        if self.question_type == QuestionType::MultipleChoice {
            let needed = self.settings.n_options() - 1;
            if let Some(q) = pool.values().find(|q| q.distractor_count() < needed) {
                return Err(QuestionError::InsufficientDistractors {
                    needed,
                    available: q.distractor_count(),
                }
                .into());
            }
        }

        tracing::debug!(
            generated = n_generated,
            pool = pool.len(),
            question_type = %self.question_type,
            "built quiz pool"
        );

        Ok(QuizSession::from_parts(
            pool,
            self.question_type,
            self.settings,
            rng,
        ))
    }

    fn generate_questions(&self) -> Result<BTreeMap<QuestionId, Question>, QuizError> {
        let matcher = self.settings.matcher_for(self.question_type);
        let mut questions = BTreeMap::new();

        for (i, (category, locations)) in self.catalogue.iter().enumerate() {
            if !self.categories.iter().any(|c| c == category) {
                continue;
            }
            let too_large = || ConfigurationError::CategoryTooLarge {
                category: category.to_string(),
            };
            let category_index = u32::try_from(i).map_err(|_| too_large())?;
            let prompt = self.settings.prompt_for(category);
            let all_locations: BTreeSet<String> = locations.keys().cloned().collect();

            for (j, (name, details)) in locations.iter().enumerate() {
                let location_index = u32::try_from(j).map_err(|_| too_large())?;
                let id = QuestionId::new(category_index, location_index);
                questions.insert(
                    id,
                    Question::new(
                        id,
                        category,
                        prompt.clone(),
                        name.clone(),
                        details.description.clone(),
                        self.question_type,
                        matcher,
                        all_locations.clone(),
                    ),
                );
            }
        }

        Ok(questions)
    }
}
