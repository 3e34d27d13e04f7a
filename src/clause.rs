use serde::{Deserialize, Serialize};

/// How well the user knows a word. Ordinal: lower variants are less known.
/// The distractor filter only offers wrong answers from the same or a lower
/// group than the target word.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
pub enum KnowledgeGroup {
    New,
    Learning,
    Familiar,
    Known,
}

impl KnowledgeGroup {
    pub fn from_i64(v: i64) -> Self {
        match v {
            1 => KnowledgeGroup::Learning,
            2 => KnowledgeGroup::Familiar,
            3 => KnowledgeGroup::Known,
            _ => KnowledgeGroup::New,
        }
    }

    pub fn as_i64(&self) -> i64 {
        *self as i64
    }
}

/// A dictionary entry: the word itself plus everything the trainer needs to
/// present and score it.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub id: i64,
    pub word: String,
    pub transcription: String,
    pub translations: Vec<String>,
    pub context: Option<String>,
    pub sound: Option<String>,
    pub group: KnowledgeGroup,
}

impl Clause {
    pub fn has_sound(&self) -> bool {
        self.sound.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Case-insensitive check for a shared translation with another clause.
    /// Used to reject near-synonyms as "wrong" answers.
    pub fn shares_translation_with(&self, other: &Clause) -> bool {
        self.translations.iter().any(|t| {
            other
                .translations
                .iter()
                .any(|o| t.eq_ignore_ascii_case(o))
        })
    }
}
