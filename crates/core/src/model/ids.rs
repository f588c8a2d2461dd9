use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Question within a quiz.
///
/// Built from the position of the category in the catalogue and the position of the
/// location inside that category, so ids stay stable for a given catalogue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId {
    category: u32,
    location: u32,
}

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(category: u32, location: u32) -> Self {
        Self { category, location }
    }

    /// Index of the category this question was generated from.
    #[must_use]
    pub fn category(&self) -> u32 {
        self.category
    }

    /// Index of the location within its category.
    #[must_use]
    pub fn location(&self) -> u32 {
        self.location
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({}_{})", self.category, self.location)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.category, self.location)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError { raw: s.to_string() };
        let (category, location) = s.split_once('_').ok_or_else(err)?;
        let category = category.parse::<u32>().map_err(|_| err())?;
        let location = location.parse::<u32>().map_err(|_| err())?;
        Ok(QuestionId::new(category, location))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
