#![forbid(unsafe_code)]

pub mod matching;
pub mod model;

pub use matching::{AnswerMatcher, AnswerMode, similarity_ratio};
