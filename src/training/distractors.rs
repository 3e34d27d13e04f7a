use crate::clause::Clause;
use itertools::Itertools;
use rand::Rng;

/// Cap on consecutive filter rejections before a slot gives up on
/// appropriateness. Keeps generation terminating on small or homogeneous
/// dictionaries.
const MAX_FILTER_RETRIES: usize = 15;

/// Produces plausible-but-wrong answer options for multiple-choice rounds.
///
/// Candidates come from the full word universe, not just the session's
/// training pool. Two strategies feed the result: the word alphabetically
/// preceding the target (a classic source of confusion), and uniform random
/// sampling with each accepted word inserted at a random position.
pub struct DistractorGenerator<'a> {
    universe: &'a [Clause],
}

impl<'a> DistractorGenerator<'a> {
    pub fn new(universe: &'a [Clause]) -> Self {
        Self { universe }
    }

    /// Build `count - 1` distractors for `target`, none equal to the target
    /// and all distinct. With `include_neighbor` the alphabetical
    /// predecessor is tried first. Callers must ensure the universe holds at
    /// least `count` words.
    pub fn generate(&self, target: &Clause, count: usize, include_neighbor: bool) -> Vec<Clause> {
        let needed = count.saturating_sub(1);
        let mut result: Vec<Clause> = Vec::with_capacity(needed);
        if needed == 0 || self.universe.is_empty() {
            return result;
        }

        if include_neighbor {
            if let Some(neighbor) = self.alphabetical_neighbor(target) {
                if is_appropriate(neighbor, target) {
                    result.push(neighbor.clone());
                }
            }
        }

        let retry_budget = self.universe.len().min(MAX_FILTER_RETRIES);
        let mut rng = rand::thread_rng();
        let mut rejected = 0usize;
        let mut filter_bypassed = false;
        while result.len() < needed {
            // Cannot produce more distinct distractors than the universe
            // holds besides the target
            if result.len() + 1 >= self.universe.len() {
                break;
            }
            let candidate = &self.universe[rng.gen_range(0..self.universe.len())];
            if candidate.id == target.id || result.iter().any(|c| c.id == candidate.id) {
                continue;
            }
            if !filter_bypassed && !is_appropriate(candidate, target) {
                rejected += 1;
                if rejected >= retry_budget {
                    filter_bypassed = true;
                }
                continue;
            }
            let pos = rng.gen_range(0..=result.len());
            result.insert(pos, candidate.clone());
            rejected = 0;
            filter_bypassed = false;
        }
        result
    }

    /// The word immediately preceding the target in a case-insensitive
    /// alphabetical ordering of the universe
    fn alphabetical_neighbor(&self, target: &Clause) -> Option<&Clause> {
        let sorted: Vec<&Clause> = self
            .universe
            .iter()
            .sorted_by(|a, b| a.word.to_lowercase().cmp(&b.word.to_lowercase()))
            .collect();
        let pos = sorted.iter().position(|c| c.id == target.id)?;
        if pos == 0 {
            None
        } else {
            Some(sorted[pos - 1])
        }
    }
}

/// A candidate is an acceptable wrong answer if the user knows it no better
/// than the target, and it is not a synonym of the target.
fn is_appropriate(candidate: &Clause, target: &Clause) -> bool {
    candidate.group <= target.group && !candidate.shares_translation_with(target)
}
