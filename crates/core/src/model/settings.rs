use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::matching::{AnswerMatcher, AnswerMode};
use crate::model::question::QuestionType;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("similarity cutoff must be within 0..=100, got {0}")]
    InvalidSimilarityCutoff(f64),

    #[error("multiple choice needs at least 2 options, got {0}")]
    InvalidOptionCount(usize),

    #[error("question template for {category:?} cannot be empty")]
    EmptyTemplate { category: String },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

pub const DEFAULT_QUESTION_MEMORY: usize = 3;
pub const DEFAULT_SIMILARITY_CUTOFF: f64 = 80.0;
pub const DEFAULT_OPTION_COUNT: usize = 4;
pub const DEFAULT_TEMPLATE: &str = "Which {category} is highlighted on the map?";

const CATEGORY_PLACEHOLDER: &str = "{category}";

/// Tunables shared by every question of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizSettings {
    question_memory: usize,
    similarity_cutoff: f64,
    case_sensitive: bool,
    n_options: usize,
    question_templates: BTreeMap<String, String>,
    default_template: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_memory: DEFAULT_QUESTION_MEMORY,
            similarity_cutoff: DEFAULT_SIMILARITY_CUTOFF,
            case_sensitive: true,
            n_options: DEFAULT_OPTION_COUNT,
            question_templates: BTreeMap::from([(
                "streets".to_string(),
                "Which street is highlighted on the map?".to_string(),
            )]),
            default_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl QuizSettings {
    /// Number of most recent draws excluded from re-selection.
    #[must_use]
    pub fn question_memory(&self) -> usize {
        self.question_memory
    }

    #[must_use]
    pub fn similarity_cutoff(&self) -> f64 {
        self.similarity_cutoff
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Options shown per multiple-choice question, answer included.
    #[must_use]
    pub fn n_options(&self) -> usize {
        self.n_options
    }

    /// Prompt used for questions of `category`.
    #[must_use]
    pub fn prompt_for(&self, category: &str) -> String {
        self.question_templates
            .get(category)
            .unwrap_or(&self.default_template)
            .replace(CATEGORY_PLACEHOLDER, category)
    }

    /// Matcher appropriate for the given question type.
    #[must_use]
    pub fn matcher_for(&self, question_type: QuestionType) -> AnswerMatcher {
        let mode = match question_type {
            QuestionType::OpenAnswer => AnswerMode::Fuzzy {
                cutoff: self.similarity_cutoff,
            },
            QuestionType::MultipleChoice => AnswerMode::Exact,
        };
        AnswerMatcher::new(mode, self.case_sensitive)
    }
}

/// Partially specified settings, e.g. read from a config file.
///
/// Missing fields take the defaults of [`QuizSettings::default`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuizSettingsDraft {
    pub question_memory: Option<usize>,
    pub similarity_cutoff: Option<f64>,
    pub case_sensitive: Option<bool>,
    pub n_options: Option<usize>,
    pub question_templates: Option<BTreeMap<String, String>>,
    pub default_template: Option<String>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the cutoff is out of range, fewer than two options are
    /// requested, or a template is blank.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let defaults = QuizSettings::default();

        let similarity_cutoff = self.similarity_cutoff.unwrap_or(defaults.similarity_cutoff);
        if !similarity_cutoff.is_finite() || !(0.0..=100.0).contains(&similarity_cutoff) {
            return Err(SettingsError::InvalidSimilarityCutoff(similarity_cutoff));
        }

        let n_options = self.n_options.unwrap_or(defaults.n_options);
        if n_options < 2 {
            return Err(SettingsError::InvalidOptionCount(n_options));
        }

        let question_templates = self
            .question_templates
            .unwrap_or(defaults.question_templates);
        if let Some((category, _)) = question_templates.iter().find(|(_, t)| t.trim().is_empty()) {
            return Err(SettingsError::EmptyTemplate {
                category: category.clone(),
            });
        }

        let default_template = self.default_template.unwrap_or(defaults.default_template);
        if default_template.trim().is_empty() {
            return Err(SettingsError::EmptyTemplate {
                category: CATEGORY_PLACEHOLDER.to_string(),
            });
        }

        Ok(QuizSettings {
            question_memory: self.question_memory.unwrap_or(defaults.question_memory),
            similarity_cutoff,
            case_sensitive: self.case_sensitive.unwrap_or(defaults.case_sensitive),
            n_options,
            question_templates,
            default_template,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert_eq!(settings.question_memory(), DEFAULT_QUESTION_MEMORY);
    }

    #[test]
    fn draft_deserializes_partial_json() {
        let draft: QuizSettingsDraft =
            serde_json::from_str(r#"{"question_memory": 1, "similarity_cutoff": 90}"#).unwrap();
        let settings = draft.validate().unwrap();
        assert_eq!(settings.question_memory(), 1);
        assert!((settings.similarity_cutoff() - 90.0).abs() < f64::EPSILON);
        assert_eq!(settings.n_options(), DEFAULT_OPTION_COUNT);
    }

    #[test]
    fn rejects_out_of_range_cutoff() {
        let draft = QuizSettingsDraft {
            similarity_cutoff: Some(120.0),
            ..QuizSettingsDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(SettingsError::InvalidSimilarityCutoff(_))
        ));
    }

    #[test]
    fn rejects_single_option() {
        let draft = QuizSettingsDraft {
            n_options: Some(1),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(draft.validate(), Err(SettingsError::InvalidOptionCount(1)));
    }

    #[test]
    fn rejects_blank_template() {
        let draft = QuizSettingsDraft {
            question_templates: Some(BTreeMap::from([("streets".into(), "  ".into())])),
            ..QuizSettingsDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(SettingsError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn prompt_falls_back_to_default_template() {
        let settings = QuizSettings::default();
        assert_eq!(
            settings.prompt_for("streets"),
            "Which street is highlighted on the map?"
        );
        assert_eq!(
            settings.prompt_for("bridge"),
            "Which bridge is highlighted on the map?"
        );
    }

    #[test]
    fn matcher_follows_question_type() {
        let settings = QuizSettings::default();
        assert_eq!(
            settings.matcher_for(QuestionType::MultipleChoice).mode(),
            AnswerMode::Exact
        );
        assert!(matches!(
            settings.matcher_for(QuestionType::OpenAnswer).mode(),
            AnswerMode::Fuzzy { .. }
        ));
    }
}
