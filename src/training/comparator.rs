use crate::stats::WordStat;
use crate::util::{days_between, success_percent};
use std::cmp::Ordering;

/// Order two words by how much they need training: `Less` means the first
/// word is more desirable, i.e. sorts first in a least-trained-first ranking.
///
/// A word with no statistic for the active test type always sorts before one
/// that has been drilled. Otherwise the combined score is
///
///   (percentA - percentB) + 10 * (attemptsA - attemptsB) + days(lastA - lastB)
///
/// and a lower score sorts first. The attempt-count difference carries ten
/// times the weight of the percent difference so under-practiced words beat
/// merely low-scoring ones. Ties break on earlier last-training time.
pub fn compare_desirability(a: Option<&WordStat>, b: Option<&WordStat>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let percent_diff = success_percent(a.success_count, a.fail_count)
                - success_percent(b.success_count, b.fail_count);
            let attempts_diff = a.total_attempts() as i64 - b.total_attempts() as i64;
            let day_diff = days_between(a.last_training, b.last_training);

            let score = percent_diff + 10 * attempts_diff + day_diff;
            match score.cmp(&0) {
                Ordering::Equal => a.last_training.cmp(&b.last_training),
                ord => ord,
            }
        }
    }
}
