mod catalogue;
mod ids;
mod question;
mod settings;

pub use ids::{ParseIdError, QuestionId};

pub use catalogue::{LocationCatalogue, LocationDetails};
pub use question::{ParseQuestionTypeError, Question, QuestionError, QuestionType};
pub use settings::{
    DEFAULT_OPTION_COUNT, DEFAULT_QUESTION_MEMORY, DEFAULT_SIMILARITY_CUTOFF, DEFAULT_TEMPLATE,
    QuizSettings, QuizSettingsDraft, SettingsError,
};
