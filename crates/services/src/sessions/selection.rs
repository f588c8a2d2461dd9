use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::BTreeSet;

use quiz_core::model::QuestionId;

/// Pick the next question id to ask.
///
/// Questions never skipped are preferred over skipped ones. Ids drawn within the last
/// `memory` draws are excluded, shrinking the window until at least one candidate
/// survives. Returns `None` only when `remaining` is empty.
pub fn select_candidate<R: Rng + ?Sized>(
    remaining: &BTreeSet<QuestionId>,
    skipped: &BTreeSet<QuestionId>,
    history: &[QuestionId],
    memory: usize,
    rng: &mut R,
) -> Option<QuestionId> {
    let fresh: BTreeSet<QuestionId> = remaining.difference(skipped).copied().collect();
    let pool = if fresh.is_empty() { remaining } else { &fresh };

    let mut candidates: Vec<QuestionId> = pool.iter().copied().collect();
    for window in (1..=memory.min(history.len())).rev() {
        let recent = &history[history.len() - window..];
        let outside: Vec<QuestionId> = candidates
            .iter()
            .copied()
            .filter(|id| !recent.contains(id))
            .collect();
        if !outside.is_empty() {
            candidates = outside;
            break;
        }
    }

    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ids(range: std::ops::Range<u32>) -> BTreeSet<QuestionId> {
        range.map(|i| QuestionId::new(0, i)).collect()
    }

    fn id(i: u32) -> QuestionId {
        QuestionId::new(0, i)
    }

    #[test]
    fn empty_remaining_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = select_candidate(&BTreeSet::new(), &BTreeSet::new(), &[], 3, &mut rng);
        assert!(picked.is_none());
    }

    #[test]
    fn skipped_questions_are_deferred() {
        let remaining = ids(0..4);
        let skipped: BTreeSet<_> = [id(0), id(1), id(2)].into_iter().collect();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = select_candidate(&remaining, &skipped, &[], 0, &mut rng);
            assert_eq!(picked, Some(id(3)));
        }
    }

    #[test]
    fn all_skipped_falls_back_to_remaining() {
        let remaining = ids(0..3);
        let skipped = remaining.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let picked = select_candidate(&remaining, &skipped, &[], 0, &mut rng).unwrap();
        assert!(remaining.contains(&picked));
    }

    #[test]
    fn recent_draws_are_excluded() {
        let remaining = ids(0..5);
        let history = [id(0), id(1), id(2), id(3)];
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked =
                select_candidate(&remaining, &BTreeSet::new(), &history, 2, &mut rng).unwrap();
            assert!(picked != id(2) && picked != id(3), "picked {picked}");
        }
    }

    #[test]
    fn memory_window_shrinks_instead_of_emptying() {
        // Both remaining ids are in the last two draws; only the last one can be excluded.
        let remaining: BTreeSet<_> = [id(0), id(1)].into_iter().collect();
        let history = [id(0), id(1)];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked =
                select_candidate(&remaining, &BTreeSet::new(), &history, 5, &mut rng).unwrap();
            assert_eq!(picked, id(0));
        }
    }

    #[test]
    fn single_remaining_is_returned_even_if_just_asked() {
        let remaining: BTreeSet<_> = [id(4)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(9);
        let picked = select_candidate(&remaining, &BTreeSet::new(), &[id(4)], 3, &mut rng);
        assert_eq!(picked, Some(id(4)));
    }
}
