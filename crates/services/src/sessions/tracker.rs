use std::collections::BTreeSet;

use quiz_core::model::QuestionId;

/// Id-only bookkeeping for a quiz; questions themselves live in the session pool.
#[derive(Debug, Clone, Default)]
pub(crate) struct QuestionTracker {
    all: BTreeSet<QuestionId>,
    current: Option<QuestionId>,
    history: Vec<QuestionId>,
    skipped: BTreeSet<QuestionId>,
    revealed: BTreeSet<QuestionId>,
    correct: BTreeSet<QuestionId>,
    // One entry per failed attempt, repeats included.
    incorrect: Vec<QuestionId>,
}

impl QuestionTracker {
    pub(crate) fn new(all: BTreeSet<QuestionId>) -> Self {
        Self {
            all,
            ..Self::default()
        }
    }

    pub(crate) fn current(&self) -> Option<QuestionId> {
        self.current
    }

    pub(crate) fn history(&self) -> &[QuestionId] {
        &self.history
    }

    pub(crate) fn skipped(&self) -> &BTreeSet<QuestionId> {
        &self.skipped
    }

    pub(crate) fn remaining(&self) -> BTreeSet<QuestionId> {
        self.all
            .iter()
            .filter(|id| !self.revealed.contains(id) && !self.correct.contains(id))
            .copied()
            .collect()
    }

    pub(crate) fn n_remaining(&self) -> usize {
        self.all
            .iter()
            .filter(|id| !self.revealed.contains(id) && !self.correct.contains(id))
            .count()
    }

    pub(crate) fn n_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub(crate) fn n_revealed(&self) -> usize {
        self.revealed.len()
    }

    pub(crate) fn n_correct(&self) -> usize {
        self.correct.len()
    }

    /// Correct ids that never had a failed attempt.
    pub(crate) fn n_first_try(&self) -> usize {
        self.correct
            .iter()
            .filter(|id| !self.incorrect.contains(id))
            .count()
    }

    /// Make `id` the pending question and record the draw.
    pub(crate) fn ask(&mut self, id: QuestionId) {
        self.current = Some(id);
        self.history.push(id);
    }

    pub(crate) fn clear_current(&mut self) {
        self.current = None;
    }

    pub(crate) fn mark_skipped(&mut self, id: QuestionId) {
        self.skipped.insert(id);
    }

    pub(crate) fn mark_revealed(&mut self, id: QuestionId) {
        self.revealed.insert(id);
        self.skipped.remove(&id);
    }

    pub(crate) fn mark_correct(&mut self, id: QuestionId) {
        self.correct.insert(id);
        self.skipped.remove(&id);
    }

    pub(crate) fn mark_incorrect(&mut self, id: QuestionId) {
        self.incorrect.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(n: u32) -> QuestionTracker {
        QuestionTracker::new((0..n).map(|i| QuestionId::new(0, i)).collect())
    }

    #[test]
    fn remaining_excludes_revealed_and_correct_only() {
        let mut t = tracker(4);
        t.mark_skipped(QuestionId::new(0, 0));
        t.mark_revealed(QuestionId::new(0, 1));
        t.mark_correct(QuestionId::new(0, 2));
        assert_eq!(t.n_remaining(), 2);
        assert!(t.remaining().contains(&QuestionId::new(0, 0)));
        assert!(t.remaining().contains(&QuestionId::new(0, 3)));
    }

    #[test]
    fn resolving_a_skipped_question_clears_the_skip() {
        let mut t = tracker(2);
        let a = QuestionId::new(0, 0);
        let b = QuestionId::new(0, 1);
        t.mark_skipped(a);
        t.mark_skipped(b);
        t.mark_revealed(a);
        t.mark_correct(b);
        assert_eq!(t.n_skipped(), 0);
    }

    #[test]
    fn first_try_ignores_ids_with_failed_attempts() {
        let mut t = tracker(3);
        let a = QuestionId::new(0, 0);
        let b = QuestionId::new(0, 1);
        t.mark_incorrect(a);
        t.mark_incorrect(a);
        t.mark_correct(a);
        t.mark_correct(b);
        assert_eq!(t.n_correct(), 2);
        assert_eq!(t.n_first_try(), 1);
    }
}
