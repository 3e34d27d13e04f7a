use crate::clause::Clause;
use crate::pool::WordPoolCache;
use crate::recorder::record_answer;
use crate::stats::{StoreError, WordStore};
use crate::training::{compare_desirability, DistractorGenerator, RoundSetBuilder, TestType};
use log::{debug, info};
use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("no words available to train")]
    EmptyPool,
    #[error("a selective drill needs at least {needed} words, dictionary has {available}")]
    NotEnoughWords { needed: usize, available: usize },
    #[error("no active round")]
    NoActiveRound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub test_type: TestType,
    pub requested_rounds: usize,
    pub answers_per_round: usize,
    /// Restrict listening drills to words with a sound reference
    pub strict_listening: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            test_type: TestType::WordToTranslation,
            requested_rounds: 10,
            answers_per_round: 5,
            strict_listening: true,
        }
    }
}

/// One round as presented to the user
#[derive(Debug, Clone)]
pub struct Round {
    pub clause: Clause,
    /// Answer options for selective modes (target included, order random);
    /// empty otherwise
    pub options: Vec<Clause>,
    /// Sprint only: the translation shown next to the word
    pub shown_translation: Option<String>,
    /// Sprint only: id of the word the shown translation was borrowed from
    shown_from: Option<i64>,
}

/// The user's response to a round
#[derive(Debug, Clone)]
pub enum Answer {
    /// A clause picked from the round's options
    Choice(i64),
    /// A free-typed word (spelling drills)
    Typed(String),
    /// Sprint: the user's claim that the shown pairing is genuine
    Judgment(bool),
}

/// What a finished round looked like, for the results screen
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub word_id: i64,
    pub word: String,
    pub given_answer: Option<String>,
    pub was_correct: bool,
    pub elapsed: Duration,
}

/// A single training session for one test type.
///
/// Owns its cache, pool and round state; nothing is shared between
/// sessions. The word-pool snapshot is rebuilt at `start` and `restart`,
/// never between rounds.
pub struct TrainingSession<S: WordStore> {
    store: S,
    config: SessionConfig,
    cache: WordPoolCache,
    universe: Vec<Clause>,
    excluded: HashSet<i64>,
    round_ids: Vec<i64>,
    current: usize,
    current_round: Option<Round>,
    round_started: Option<Instant>,
    outcomes: Vec<RoundOutcome>,
}

impl<S: WordStore> TrainingSession<S> {
    pub fn new(store: S, config: SessionConfig) -> Self {
        let cache = WordPoolCache::new(config.test_type);
        Self {
            store,
            config,
            cache,
            universe: Vec::new(),
            excluded: HashSet::new(),
            round_ids: Vec::new(),
            current: 0,
            current_round: None,
            round_started: None,
            outcomes: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The injected store, e.g. for results-screen queries
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start with the default candidate pool: every word in the dictionary,
    /// or only words with a sound reference for strict listening drills
    pub fn start(&mut self) -> Result<(), TrainingError> {
        let has_sound = (self.config.test_type.requires_sound() && self.config.strict_listening)
            .then_some(true);
        let pool: Vec<i64> = self
            .store
            .clauses_by_filter(has_sound)?
            .iter()
            .map(|c| c.id)
            .collect();
        self.start_with_pool(pool)
    }

    /// Start a session over a caller-supplied candidate pool
    pub fn start_with_pool(&mut self, pool: Vec<i64>) -> Result<(), TrainingError> {
        let mut pool: Vec<i64> = pool
            .into_iter()
            .filter(|id| !self.excluded.contains(id))
            .collect();
        if pool.is_empty() {
            return Err(TrainingError::EmptyPool);
        }
        if self.config.test_type.is_selective() {
            let available = self.store.total_word_count()?;
            if available < self.config.answers_per_round {
                return Err(TrainingError::NotEnoughWords {
                    needed: self.config.answers_per_round,
                    available,
                });
            }
        }

        self.cache.refresh(&self.store)?;
        self.universe = self
            .store
            .clauses_by_filter(None)?
            .into_iter()
            .filter(|c| !self.excluded.contains(&c.id))
            .collect();

        pool.sort_by(|&a, &b| {
            compare_desirability(self.cache.stat_for(a), self.cache.stat_for(b))
        });
        self.round_ids = RoundSetBuilder::new(&self.cache).build(&pool, self.config.requested_rounds);
        info!(
            "session started: {} rounds of {} over pool of {}",
            self.round_ids.len(),
            self.config.test_type,
            pool.len()
        );

        self.current = 0;
        self.current_round = None;
        self.outcomes.clear();
        self.prepare_round();
        Ok(())
    }

    /// Exclude words (e.g. deleted from the results screen) from any
    /// subsequent round-set recomputation on this session
    pub fn exclude_words(&mut self, ids: &[i64]) {
        self.excluded.extend(ids.iter().copied());
    }

    /// Re-run the session: fresh snapshot, fresh round set, same exclusions
    pub fn restart(&mut self) -> Result<(), TrainingError> {
        self.start()
    }

    pub fn is_finished(&self) -> bool {
        self.current_round.is_none()
    }

    /// (completed, total) rounds
    pub fn progress(&self) -> (usize, usize) {
        (self.outcomes.len(), self.round_ids.len())
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.current_round.as_ref()
    }

    /// Per-round outcomes recorded so far, in play order
    pub fn outcomes(&self) -> &[RoundOutcome] {
        &self.outcomes
    }

    /// Score and persist the answer for the active round, then advance
    pub fn submit_answer(&mut self, answer: Answer) -> Result<RoundOutcome, TrainingError> {
        let round = self.current_round.take().ok_or(TrainingError::NoActiveRound)?;
        let elapsed = self
            .round_started
            .map(|t| t.elapsed())
            .unwrap_or_default();

        let (was_correct, given_answer, penalty_id) = self.evaluate(&round, &answer)?;
        record_answer(
            &self.store,
            self.config.test_type,
            round.clause.id,
            was_correct,
            penalty_id,
        )?;

        let outcome = RoundOutcome {
            word_id: round.clause.id,
            word: round.clause.word.clone(),
            given_answer,
            was_correct,
            elapsed,
        };
        self.outcomes.push(outcome.clone());

        self.current += 1;
        self.prepare_round();
        Ok(outcome)
    }

    fn evaluate(
        &self,
        round: &Round,
        answer: &Answer,
    ) -> Result<(bool, Option<String>, Option<i64>), TrainingError> {
        match answer {
            Answer::Choice(id) => {
                let was_correct = *id == round.clause.id;
                let given = round
                    .options
                    .iter()
                    .find(|c| c.id == *id)
                    .map(|c| c.word.clone());
                let penalty = (!was_correct).then_some(*id);
                Ok((was_correct, given, penalty))
            }
            Answer::Typed(text) => {
                let text = text.trim();
                let was_correct = text.eq_ignore_ascii_case(&round.clause.word);
                let penalty = if was_correct {
                    None
                } else {
                    // Resolve the typo back to a real word for cross-penalty
                    self.store
                        .clause_id_by_word(text)?
                        .filter(|id| *id != round.clause.id)
                };
                Ok((was_correct, Some(text.to_string()), penalty))
            }
            Answer::Judgment(claimed_genuine) => {
                let genuine = round.shown_from == Some(round.clause.id);
                let was_correct = *claimed_genuine == genuine;
                // Believing a borrowed translation penalizes its word
                let penalty = (!was_correct)
                    .then_some(round.shown_from)
                    .flatten()
                    .filter(|id| *id != round.clause.id);
                Ok((was_correct, round.shown_translation.clone(), penalty))
            }
        }
    }

    /// Build the presentation of the next pending round, skipping ids whose
    /// clause no longer exists
    fn prepare_round(&mut self) {
        self.current_round = None;
        self.round_started = None;

        while self.current < self.round_ids.len() {
            let id = self.round_ids[self.current];
            let clause = self
                .universe
                .iter()
                .find(|c| c.id == id && !self.excluded.contains(&id))
                .cloned();
            let Some(clause) = clause else {
                debug!("skipping vanished word {id}");
                self.current += 1;
                continue;
            };

            self.current_round = Some(self.present(clause));
            self.round_started = Some(Instant::now());
            return;
        }
    }

    fn present(&self, clause: Clause) -> Round {
        let mut rng = rand::thread_rng();
        let generator = DistractorGenerator::new(&self.universe);

        match self.config.test_type {
            t if t.is_selective() => {
                // Alphabetical neighbors only make sense where the options
                // shown are the words themselves
                let include_neighbor = matches!(t, TestType::TranslationToWord);
                let mut options =
                    generator.generate(&clause, self.config.answers_per_round, include_neighbor);
                let pos = rng.gen_range(0..=options.len());
                options.insert(pos, clause.clone());
                Round {
                    clause,
                    options,
                    shown_translation: None,
                    shown_from: None,
                }
            }
            TestType::Sprint => {
                // Half the pairings are genuine, half borrow a translation
                // from a plausible wrong word
                let fake = generator
                    .generate(&clause, 2, false)
                    .into_iter()
                    .next()
                    .filter(|_| rng.gen_bool(0.5));
                let (shown_translation, shown_from) = match fake {
                    Some(other) => (
                        other.translations.first().cloned().unwrap_or_default(),
                        Some(other.id),
                    ),
                    None => (
                        clause.translations.first().cloned().unwrap_or_default(),
                        Some(clause.id),
                    ),
                };
                Round {
                    clause,
                    options: Vec::new(),
                    shown_translation: Some(shown_translation),
                    shown_from,
                }
            }
            // Word constructor: the user rebuilds the word, no options
            _ => Round {
                clause,
                options: Vec::new(),
                shown_translation: None,
                shown_from: None,
            },
        }
    }
}
