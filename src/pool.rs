use crate::stats::{AsteriskMarker, StoreResult, WordStat, WordStore};
use crate::training::TestType;
use std::collections::HashMap;

/// Snapshot of one word's training state for the active test type
#[derive(Debug, Clone)]
pub struct CachedWord {
    pub word: String,
    pub stat: Option<WordStat>,
    pub asterisk: Option<AsteriskMarker>,
}

/// In-memory snapshot of per-word training data for a single test type.
/// Rebuilt wholesale via `refresh` at session start and after a results
/// screen closes, never mid-round.
#[derive(Debug)]
pub struct WordPoolCache {
    test_type: TestType,
    words: HashMap<i64, CachedWord>,
}

impl WordPoolCache {
    pub fn new(test_type: TestType) -> Self {
        Self {
            test_type,
            words: HashMap::new(),
        }
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    /// Replace the whole snapshot from the store
    pub fn refresh<S: WordStore + ?Sized>(&mut self, store: &S) -> StoreResult<()> {
        let data = store.word_training_statistics(&[self.test_type])?;
        let mut words = HashMap::with_capacity(data.len());
        for entry in data {
            let stat = entry
                .statistics
                .into_iter()
                .find(|s| s.test_type == self.test_type);
            words.insert(
                entry.id,
                CachedWord {
                    word: entry.word,
                    stat,
                    asterisk: entry.asterisk,
                },
            );
        }
        self.words = words;
        Ok(())
    }

    pub fn stat_for(&self, id: i64) -> Option<&WordStat> {
        self.words.get(&id).and_then(|w| w.stat.as_ref())
    }

    pub fn asterisk_for(&self, id: i64) -> Option<&AsteriskMarker> {
        self.words.get(&id).and_then(|w| w.asterisk.as_ref())
    }

    pub fn word_for(&self, id: i64) -> Option<&str> {
        self.words.get(&id).map(|w| w.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
