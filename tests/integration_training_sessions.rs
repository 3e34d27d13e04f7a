use lexdrill::clause::KnowledgeGroup;
use lexdrill::session::{Answer, SessionConfig, TrainingSession};
use lexdrill::stats::{StatsDb, WordStore};
use lexdrill::training::TestType;

/// Integration tests for training session workflows: end-to-end behavior of
/// drill sessions, statistics recording and re-selection over a real
/// (in-memory) SQLite store.

fn seeded_db(n: usize) -> (StatsDb, Vec<i64>) {
    let mut db = StatsDb::open_in_memory().unwrap();
    let ids = (0..n)
        .map(|i| {
            db.add_clause(
                &format!("word{i}"),
                "",
                &[format!("translation{i}")],
                None,
                Some("sound.mp3"),
                KnowledgeGroup::New,
            )
            .unwrap()
        })
        .collect();
    (db, ids)
}

#[test]
fn session_records_statistics_for_every_round() {
    let (db, ids) = seeded_db(6);
    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::WordToTranslation,
            requested_rounds: 6,
            answers_per_round: 4,
            ..Default::default()
        },
    );
    session.start_with_pool(ids.clone()).unwrap();

    let mut wrong_rounds = 0;
    while let Some(round) = session.current_round().cloned() {
        // Answer the first three rounds wrong (picking some other option),
        // the rest right
        let answer = if wrong_rounds < 3 {
            let wrong = round
                .options
                .iter()
                .find(|c| c.id != round.clause.id)
                .unwrap();
            wrong_rounds += 1;
            Answer::Choice(wrong.id)
        } else {
            Answer::Choice(round.clause.id)
        };
        session.submit_answer(answer).unwrap();
    }

    let outcomes = session.outcomes();
    assert_eq!(outcomes.len(), 6);
    assert_eq!(outcomes.iter().filter(|o| !o.was_correct).count(), 3);
    // Every word appears exactly once
    let mut words: Vec<&str> = outcomes.iter().map(|o| o.word.as_str()).collect();
    words.sort_unstable();
    words.dedup();
    assert_eq!(words.len(), 6);
}

#[test]
fn failed_word_statistics_visible_in_store() {
    let (db, ids) = seeded_db(4);
    let victim = ids[1];
    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::WordConstructor,
            requested_rounds: 4,
            answers_per_round: 4,
            ..Default::default()
        },
    );

    for _ in 0..2 {
        session.start_with_pool(ids.clone()).unwrap();
        while let Some(round) = session.current_round().cloned() {
            let answer = if round.clause.id == victim {
                Answer::Typed("garbage".to_string())
            } else {
                Answer::Typed(round.clause.word.clone())
            };
            session.submit_answer(answer).unwrap();
        }
    }

    let data = session
        .store()
        .word_training_statistics(&[TestType::WordConstructor])
        .unwrap();
    let victim_stat = data
        .iter()
        .find(|d| d.id == victim)
        .and_then(|d| d.statistics.first())
        .unwrap();
    assert_eq!(victim_stat.success_count, 0);
    assert_eq!(victim_stat.fail_count, 2);

    let other_stat = data
        .iter()
        .find(|d| d.id == ids[0])
        .and_then(|d| d.statistics.first())
        .unwrap();
    assert_eq!(other_stat.success_count, 2);
    assert_eq!(other_stat.fail_count, 0);
}

#[test]
fn typed_wrong_answer_penalizes_the_confused_word() {
    let (db, ids) = seeded_db(4);
    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::WordConstructor,
            requested_rounds: 1,
            answers_per_round: 4,
            ..Default::default()
        },
    );
    session.start_with_pool(ids.clone()).unwrap();

    let round = session.current_round().cloned().unwrap();
    // Type some *other* real word from the dictionary
    let confused_word = if round.clause.word == "word0" { "word1" } else { "word0" };
    let outcome = session
        .submit_answer(Answer::Typed(confused_word.to_string()))
        .unwrap();
    assert!(!outcome.was_correct);

    let confused_id = session
        .store()
        .clause_id_by_word(confused_word)
        .unwrap()
        .unwrap();
    let data = session
        .store()
        .word_training_statistics(&[TestType::WordConstructor])
        .unwrap();
    let confused_stat = data
        .iter()
        .find(|d| d.id == confused_id)
        .and_then(|d| d.statistics.first())
        .unwrap();
    assert_eq!(confused_stat.fail_count, 1);
}

#[test]
fn deleted_words_stay_out_after_restart() {
    let (db, ids) = seeded_db(6);
    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::WordConstructor,
            requested_rounds: 6,
            answers_per_round: 4,
            ..Default::default()
        },
    );
    session.start_with_pool(ids.clone()).unwrap();

    // Results screen reports two words as deleted
    session.exclude_words(&[ids[2], ids[4]]);
    session.restart().unwrap();

    assert_eq!(session.progress().1, 4);
    while let Some(round) = session.current_round().cloned() {
        assert!(round.clause.id != ids[2] && round.clause.id != ids[4]);
        session
            .submit_answer(Answer::Typed(round.clause.word.clone()))
            .unwrap();
    }
}

#[test]
fn sprint_session_penalizes_believed_fakes() {
    let (db, ids) = seeded_db(8);
    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::Sprint,
            requested_rounds: 8,
            answers_per_round: 2,
            ..Default::default()
        },
    );

    // Run sessions until a fake pairing shows up, then claim it is genuine
    let mut punished: Option<(i64, String)> = None;
    'outer: for _ in 0..40 {
        session.start_with_pool(ids.clone()).unwrap();
        while let Some(round) = session.current_round().cloned() {
            let shown = round.shown_translation.clone().unwrap();
            let genuine = round
                .clause
                .translations
                .iter()
                .any(|t| t.eq_ignore_ascii_case(&shown));
            if !genuine && punished.is_none() {
                // translationN belongs to wordN
                let owner_idx: usize = shown
                    .trim_start_matches("translation")
                    .parse()
                    .unwrap();
                punished = Some((ids[owner_idx], shown.clone()));
                let outcome = session.submit_answer(Answer::Judgment(true)).unwrap();
                assert!(!outcome.was_correct);
                break 'outer;
            }
            session.submit_answer(Answer::Judgment(genuine)).unwrap();
        }
    }

    let (punished_id, _) = punished.expect("no fake pairing in 40 sessions");
    let data = session
        .store()
        .word_training_statistics(&[TestType::Sprint])
        .unwrap();
    let stat = data
        .iter()
        .find(|d| d.id == punished_id)
        .and_then(|d| d.statistics.first())
        .unwrap();
    assert!(stat.fail_count >= 1, "believed fake was not penalized");
}

#[test]
fn listening_session_over_default_pool() {
    let (mut db, _) = seeded_db(5);
    // One word without sound must never come up
    let silent = db
        .add_clause("silent", "", &["quiet".to_string()], None, None, KnowledgeGroup::New)
        .unwrap();

    let mut session = TrainingSession::new(
        db,
        SessionConfig {
            test_type: TestType::Listening,
            requested_rounds: 10,
            answers_per_round: 4,
            ..Default::default()
        },
    );
    session.start().unwrap();
    assert_eq!(session.progress().1, 5);

    while let Some(round) = session.current_round().cloned() {
        assert_ne!(round.clause.id, silent);
        assert_eq!(round.options.len(), 4);
        session
            .submit_answer(Answer::Choice(round.clause.id))
            .unwrap();
    }
    assert!(session.outcomes().iter().all(|o| o.was_correct));
}
