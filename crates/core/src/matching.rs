//! Answer matching for typed and multiple-choice answers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

//
// ─── SIMILARITY ────────────────────────────────────────────────────────────────
//

/// Indel-normalised similarity between two strings on a 0–100 scale.
///
/// Computed as `100 * 2 * lcs / (len(a) + len(b))` over Unicode scalar values, where
/// `lcs` is the length of the longest common subsequence. Two empty strings are
/// considered identical.
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    if total == 0 {
        return 100.0;
    }

    let lcs = longest_common_subsequence(&a_chars, &b_chars);
    #[allow(clippy::cast_precision_loss)]
    let ratio = (2 * lcs) as f64 / total as f64;
    ratio * 100.0
}

fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Single rolling row over `b`.
    let mut row = vec![0_usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

//
// ─── MATCHER ───────────────────────────────────────────────────────────────────
//

/// How a candidate answer is compared with the stored answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AnswerMode {
    /// String equality.
    Exact,
    /// Similarity ratio must reach `cutoff` (0–100).
    Fuzzy { cutoff: f64 },
}

/// Compares candidate answers against a stored answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerMatcher {
    mode: AnswerMode,
    case_sensitive: bool,
}

impl AnswerMatcher {
    #[must_use]
    pub fn new(mode: AnswerMode, case_sensitive: bool) -> Self {
        Self {
            mode,
            case_sensitive,
        }
    }

    #[must_use]
    pub fn exact() -> Self {
        Self::new(AnswerMode::Exact, true)
    }

    #[must_use]
    pub fn fuzzy(cutoff: f64) -> Self {
        Self::new(AnswerMode::Fuzzy { cutoff }, true)
    }

    #[must_use]
    pub fn mode(&self) -> AnswerMode {
        self.mode
    }

    #[must_use]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns true when `candidate` is accepted as `answer`.
    ///
    /// Surrounding whitespace is ignored on both sides.
    #[must_use]
    pub fn matches(&self, answer: &str, candidate: &str) -> bool {
        let answer = self.normalize(answer);
        let candidate = self.normalize(candidate);

        match self.mode {
            AnswerMode::Exact => answer == candidate,
            AnswerMode::Fuzzy { cutoff } => similarity_ratio(&answer, &candidate) >= cutoff,
        }
    }

    fn normalize<'s>(&self, raw: &'s str) -> Cow<'s, str> {
        let trimmed = raw.trim();
        if self.case_sensitive {
            Cow::Borrowed(trimmed)
        } else {
            Cow::Owned(trimmed.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert!((similarity_ratio("Coolsingel", "Coolsingel") - 100.0).abs() < f64::EPSILON);
        assert!((similarity_ratio("", "") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_substitution_in_ten_chars_scores_90() {
        let ratio = similarity_ratio("Coolsingel", "Coolsingal");
        assert!((ratio - 90.0).abs() < 1e-9, "ratio was {ratio}");
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(similarity_ratio("Coolsingel", "xyz") < 20.0);
        assert!(similarity_ratio("abc", "").abs() < f64::EPSILON);
    }

    #[test]
    fn fuzzy_matcher_uses_cutoff() {
        let matcher = AnswerMatcher::fuzzy(80.0);
        assert!(matcher.matches("Coolsingel", "Coolsingel"));
        assert!(matcher.matches("Coolsingel", "Coolsingal"));
        assert!(!matcher.matches("Coolsingel", "Witte de Withstraat"));
    }

    #[test]
    fn exact_matcher_respects_case_setting() {
        let strict = AnswerMatcher::exact();
        assert!(strict.matches("Blaak", "Blaak"));
        assert!(!strict.matches("Blaak", "blaak"));

        let relaxed = AnswerMatcher::new(AnswerMode::Exact, false);
        assert!(relaxed.matches("Blaak", "blaak"));
    }

    #[test]
    fn candidate_whitespace_is_ignored() {
        assert!(AnswerMatcher::exact().matches("Blaak", "  Blaak \n"));
    }

    #[test]
    fn padded_stored_answer_matches_itself() {
        let exact = AnswerMatcher::exact();
        assert!(exact.matches("Blaak ", "Blaak "));
        assert!(exact.matches("Blaak ", "Blaak"));
        assert!(!exact.matches("Blaak ", "Meent"));

        let relaxed = AnswerMatcher::new(AnswerMode::Exact, false);
        assert!(relaxed.matches(" Blaak", "BLAAK "));
        assert!(AnswerMatcher::fuzzy(80.0).matches("Coolsingel  ", "Coolsingel"));
    }
}
