use crate::pool::WordPoolCache;
use crate::stats::AsteriskMarker;
use crate::training::{categories_for, TestType};
use crate::util::days_between;
use chrono::{DateTime, Local};
use log::debug;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Share of each round set filled by uniform random sampling
const RANDOM_TIER_SHARE: f64 = 0.3333;

/// Builds the ordered list of word ids presented during one session.
///
/// The candidate pool must already be sorted most-desirable-first. Selection
/// runs in four tiers, each skipping ids picked by an earlier tier: uniform
/// random sampling up to a third of the budget, then asterisk-flagged words,
/// then never-tested words, then the remaining ranked words. The assembled
/// list is finally passed through a cheap pseudo-shuffle so tier boundaries
/// do not show up as blocks of similar words.
pub struct RoundSetBuilder<'a> {
    cache: &'a WordPoolCache,
}

impl<'a> RoundSetBuilder<'a> {
    pub fn new(cache: &'a WordPoolCache) -> Self {
        Self { cache }
    }

    /// Produce the round set for this session. The result never exceeds
    /// `min(requested_rounds, pool.len())` and contains no duplicates; an
    /// empty pool yields an empty set.
    pub fn build(&self, pool: &[i64], requested_rounds: usize) -> Vec<i64> {
        let mut selected = self.compose(pool, requested_rounds);
        pseudo_shuffle(&mut selected);
        selected
    }

    /// Tier composition without the final shuffle; `build` is `compose`
    /// plus `pseudo_shuffle`.
    pub fn compose(&self, pool: &[i64], requested_rounds: usize) -> Vec<i64> {
        // Duplicate ids would let the random tier chase a target it can
        // never reach
        let mut seen: HashSet<i64> = HashSet::with_capacity(pool.len());
        let pool: Vec<i64> = pool.iter().copied().filter(|id| seen.insert(*id)).collect();
        if pool.is_empty() || requested_rounds == 0 {
            return Vec::new();
        }
        let round_count = requested_rounds.min(pool.len());
        let mut selected: Vec<i64> = Vec::with_capacity(round_count);

        // Tier 1: uniform random picks from the whole pool
        let random_target = ((round_count as f64 * RANDOM_TIER_SHARE).round() as usize)
            .min(round_count);
        let mut rng = rand::thread_rng();
        while selected.len() < random_target {
            let id = pool[rng.gen_range(0..pool.len())];
            if !selected.contains(&id) {
                selected.push(id);
            }
        }

        // Tier 2: asterisk-flagged words, in desirability order
        for &id in &pool {
            if selected.len() >= round_count {
                break;
            }
            if selected.contains(&id) {
                continue;
            }
            if self
                .cache
                .asterisk_for(id)
                .is_some_and(|m| marker_is_active(m, self.cache.test_type()))
            {
                selected.push(id);
            }
        }

        // Tier 3: words never tested in this mode
        for &id in &pool {
            if selected.len() >= round_count {
                break;
            }
            if !selected.contains(&id) && self.cache.stat_for(id).is_none() {
                selected.push(id);
            }
        }

        // Tier 4: remaining words, most desirable first
        for &id in &pool {
            if selected.len() >= round_count {
                break;
            }
            if !selected.contains(&id) {
                selected.push(id);
            }
        }

        debug!(
            "round set composed: {} of {} candidates ({} random)",
            selected.len(),
            pool.len(),
            random_target
        );
        selected
    }
}

/// Whether an asterisk marker forces this word into rotation for the given
/// test type: the marker must cover one of the type's categories and that
/// category must not have been drilled within the last day.
fn marker_is_active(marker: &AsteriskMarker, test_type: TestType) -> bool {
    let now = Local::now();
    let stale =
        |ts: Option<DateTime<Local>>| ts.map_or(true, |t| days_between(now, t) >= 1);
    match marker.marker_type.category() {
        // AllTypes: any category this test type touches qualifies
        None => categories_for(test_type)
            .iter()
            .any(|&c| stale(marker.last_train_for(c))),
        Some(category) => {
            categories_for(test_type).contains(&category)
                && stale(marker.last_train_for(category))
        }
    }
}

/// Three passes of a random three-way comparator. Deliberately cheap and
/// only approximately uniform; good enough to break up tier adjacency.
///
/// The comparator is applied by hand in an insertion pass: `slice::sort_by`
/// rejects comparators that violate a total order.
pub fn pseudo_shuffle(ids: &mut [i64]) {
    let mut rng = rand::thread_rng();
    for _ in 0..3 {
        for i in 1..ids.len() {
            let mut j = i;
            while j > 0 && random_ordering(&mut rng) == Ordering::Greater {
                ids.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}

fn random_ordering(rng: &mut impl Rng) -> Ordering {
    match rng.gen_range(0..3u8) {
        0 => Ordering::Less,
        1 => Ordering::Equal,
        _ => Ordering::Greater,
    }
}
