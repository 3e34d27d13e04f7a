use crate::stats::{StoreResult, WordStore};
use crate::training::{categories_for, TestType, TrainingCategory};
use chrono::Local;
use log::debug;

/// Persist one round's outcome.
///
/// Increments the word's success or fail counter for the test type and
/// stamps the asterisk category timestamps the type belongs to; a drill
/// counts as "drilled" whether or not it was answered correctly. When the
/// user picked a specific wrong word, that word also gets a failure recorded:
/// confusing two words pulls both toward more frequent future drilling.
pub fn record_answer<S: WordStore + ?Sized>(
    store: &S,
    test_type: TestType,
    word_id: i64,
    was_correct: bool,
    given_answer_id: Option<i64>,
) -> StoreResult<()> {
    store.add_or_update_statistic(test_type, word_id, was_correct)?;

    let now = Local::now();
    let categories = categories_for(test_type);
    let stamp = |c: TrainingCategory| categories.contains(&c).then_some(now);
    store.update_asterisk_timestamps(
        word_id,
        stamp(TrainingCategory::Meaning),
        stamp(TrainingCategory::Spelling),
        stamp(TrainingCategory::Listening),
    )?;

    if !was_correct {
        if let Some(given_id) = given_answer_id {
            if given_id != word_id {
                debug!("penalizing mistakenly chosen word {given_id} for {test_type}");
                store.add_or_update_statistic(test_type, given_id, false)?;
            }
        }
    }
    Ok(())
}
