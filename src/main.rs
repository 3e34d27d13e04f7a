pub mod app_dirs;
pub mod clause;
pub mod config;
pub mod pool;
pub mod recorder;
pub mod session;
pub mod stats;
pub mod training;
pub mod util;

use crate::{
    clause::{Clause, KnowledgeGroup},
    config::{Config, ConfigStore, FileConfigStore},
    session::{Answer, Round, RoundOutcome, SessionConfig, TrainingError, TrainingSession},
    stats::{AsteriskType, StatsDb, WordStore},
    training::TestType,
    util::success_percent,
};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use rand::seq::SliceRandom;
use std::error::Error;
use std::io::{self, Write};

/// personal vocabulary trainer with statistics-biased word selection
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "A vocabulary trainer that drills your dictionary with several test modes and biases word selection towards the words you know least."
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// add a word to the dictionary
    Add {
        word: String,
        /// comma-separated translations
        #[clap(short, long, required = true, value_delimiter = ',')]
        translations: Vec<String>,
        /// phonetic transcription
        #[clap(short = 'x', long, default_value = "")]
        transcription: String,
        /// usage context / example sentence
        #[clap(short, long)]
        context: Option<String>,
        /// sound file reference
        #[clap(short, long)]
        sound: Option<String>,
        /// how well the word is already known
        #[clap(short, long, value_enum, default_value_t = KnowledgeGroup::New)]
        group: KnowledgeGroup,
    },
    /// run a training session
    Train {
        /// drill mode
        #[clap(short, long, value_enum)]
        test_type: Option<TestType>,
        /// number of rounds
        #[clap(short, long)]
        rounds: Option<usize>,
        /// answer options per round in multiple-choice modes
        #[clap(short, long)]
        answers: Option<usize>,
        /// restrict listening drills to words with a sound reference
        #[clap(long, value_name = "BOOL")]
        strict_listening: Option<bool>,
    },
    /// show per-word training statistics
    Stats {
        /// restrict to one drill mode
        #[clap(short, long, value_enum)]
        test_type: Option<TestType>,
    },
    /// list all dictionary entries
    List,
    /// delete a dictionary entry
    Delete { id: i64 },
    /// set an asterisk urgency marker on a word
    Mark {
        id: i64,
        /// which training categories the marker forces into rotation
        #[clap(short, long, default_value = "all-types")]
        marker: String,
    },
    /// remove a word's asterisk marker
    Unmark { id: i64 },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let mut db = StatsDb::new()?;

    match cli.command {
        Command::Add {
            word,
            translations,
            transcription,
            context,
            sound,
            group,
        } => {
            let id = db.add_clause(
                &word,
                &transcription,
                &translations,
                context.as_deref(),
                sound.as_deref(),
                group,
            )?;
            println!("added '{word}' (#{id})");
        }
        Command::Train {
            test_type,
            rounds,
            answers,
            strict_listening,
        } => {
            let config_store = FileConfigStore::new();
            let mut cfg = config_store.load();
            if let Some(t) = test_type {
                cfg.test_type = t;
            }
            if let Some(r) = rounds {
                cfg.rounds_per_session = r;
            }
            if let Some(a) = answers {
                cfg.answers_per_round = a;
            }
            if let Some(s) = strict_listening {
                cfg.strict_listening = s;
            }
            let _ = config_store.save(&cfg);
            run_training(db, &cfg)?;
        }
        Command::Stats { test_type } => print_stats(&db, test_type)?,
        Command::List => {
            for c in db.clauses_by_filter(None)? {
                println!(
                    "#{} {} {} — {} [{}]",
                    c.id,
                    c.word,
                    c.transcription,
                    c.translations.join(", "),
                    c.group
                );
            }
        }
        Command::Delete { id } => {
            db.delete_clause(id)?;
            println!("deleted #{id}");
        }
        Command::Mark { id, marker } => {
            let marker_type = match marker.as_str() {
                "all-types" | "all" => AsteriskType::AllTypes,
                "meaning" => AsteriskType::Meaning,
                "spelling" => AsteriskType::Spelling,
                "listening" => AsteriskType::Listening,
                other => return Err(format!("unknown marker type '{other}'").into()),
            };
            db.set_asterisk(id, marker_type)?;
            println!("marked #{id}");
        }
        Command::Unmark { id } => {
            db.clear_asterisk(id)?;
            println!("unmarked #{id}");
        }
    }
    Ok(())
}

fn run_training(db: StatsDb, cfg: &Config) -> Result<(), Box<dyn Error>> {
    let mut session = TrainingSession::new(db, SessionConfig::from(cfg));
    match session.start() {
        Ok(()) => {}
        Err(e @ TrainingError::EmptyPool) | Err(e @ TrainingError::NotEnoughWords { .. }) => {
            eprintln!("cannot start training: {e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    }

    let (_, total) = session.progress();
    println!("{} — {total} rounds\n", cfg.test_type.to_string().bold());

    while let Some(round) = session.current_round().cloned() {
        let (done, total) = session.progress();
        println!("round {}/{total}", done + 1);

        let answer = ask(&round, cfg.test_type)?;
        let outcome = session.submit_answer(answer)?;
        report(&round, &outcome);
    }

    let outcomes = session.outcomes();
    let correct = outcomes.iter().filter(|o| o.was_correct).count();
    println!(
        "\n{}: {correct}/{} correct",
        "session complete".bold(),
        outcomes.len()
    );
    for o in outcomes {
        let mark = if o.was_correct {
            "✓".green()
        } else {
            "✗".red()
        };
        println!("  {mark} {} ({:.1}s)", o.word, o.elapsed.as_secs_f64());
    }
    Ok(())
}

fn ask(round: &Round, test_type: TestType) -> Result<Answer, Box<dyn Error>> {
    match test_type {
        TestType::TranslationToWord => {
            println!("which word means: {}", round.clause.translations.join(", "));
            choose(round, |c| c.word.clone())
        }
        TestType::WordToTranslation => {
            println!("what does '{}' mean?", round.clause.word.clone().bold());
            choose(round, |c| c.translations.join(", "))
        }
        TestType::Listening => {
            let sound = round.clause.sound.as_deref().unwrap_or("-");
            println!("which word did you hear? (sound: {sound})");
            choose(round, |c| c.word.clone())
        }
        TestType::WordConstructor => {
            let mut letters: Vec<char> = round.clause.word.chars().collect();
            letters.shuffle(&mut rand::thread_rng());
            let scrambled: String = letters.into_iter().collect();
            println!(
                "build the word for '{}' from: {}",
                round.clause.translations.join(", "),
                scrambled.bold()
            );
            Ok(Answer::Typed(read_line()?))
        }
        TestType::Sprint => {
            let shown = round.shown_translation.as_deref().unwrap_or("-");
            println!("{} = {shown}? [y/n]", round.clause.word.clone().bold());
            let reply = read_line()?;
            Ok(Answer::Judgment(reply.eq_ignore_ascii_case("y")))
        }
    }
}

fn choose(round: &Round, label: impl Fn(&Clause) -> String) -> Result<Answer, Box<dyn Error>> {
    for (i, option) in round.options.iter().enumerate() {
        println!("  {}) {}", i + 1, label(option));
    }
    loop {
        let reply = read_line()?;
        if let Ok(n) = reply.parse::<usize>() {
            if n >= 1 && n <= round.options.len() {
                return Ok(Answer::Choice(round.options[n - 1].id));
            }
        }
        println!("enter a number between 1 and {}", round.options.len());
    }
}

fn report(round: &Round, outcome: &RoundOutcome) {
    if outcome.was_correct {
        println!("{}\n", "correct".green());
    } else {
        println!(
            "{} — '{}' is: {}\n",
            "wrong".red(),
            round.clause.word,
            round.clause.translations.join(", ")
        );
    }
}

fn print_stats(db: &StatsDb, test_type: Option<TestType>) -> Result<(), Box<dyn Error>> {
    let filter: Vec<TestType> = test_type.into_iter().collect();
    for entry in db.word_training_statistics(&filter)? {
        let marker = if entry.asterisk.is_some() { " *" } else { "" };
        println!("#{} {}{marker}", entry.id, entry.word.clone().bold());
        if entry.statistics.is_empty() {
            println!("    never trained");
            continue;
        }
        for s in &entry.statistics {
            println!(
                "    {}: {}% ({} ok / {} failed), last {}",
                s.test_type,
                success_percent(s.success_count, s.fail_count),
                s.success_count,
                s.fail_count,
                s.last_training.format("%Y-%m-%d %H:%M")
            );
        }
    }
    Ok(())
}

fn read_line() -> io::Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim().to_string())
}
