use serde::{Deserialize, Serialize};

/// The five drill modes. Stored per-word in the statistics table, so the
/// discriminants are part of the on-disk format.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
pub enum TestType {
    TranslationToWord,
    WordToTranslation,
    WordConstructor,
    Listening,
    Sprint,
}

impl TestType {
    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            0 => Some(TestType::TranslationToWord),
            1 => Some(TestType::WordToTranslation),
            2 => Some(TestType::WordConstructor),
            3 => Some(TestType::Listening),
            4 => Some(TestType::Sprint),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> i64 {
        *self as i64
    }

    /// Multiple-choice modes that present distractors alongside the answer.
    pub fn is_selective(&self) -> bool {
        matches!(
            self,
            TestType::TranslationToWord | TestType::WordToTranslation | TestType::Listening
        )
    }

    /// Listening drills need a sound file to play.
    pub fn requires_sound(&self) -> bool {
        matches!(self, TestType::Listening)
    }
}

/// Skill a drill exercises. Asterisk markers and their last-trained
/// timestamps are tracked per category, not per test type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingCategory {
    Meaning,
    Spelling,
    Listening,
}

/// Which categories each test type belongs to. Consulted functionally
/// everywhere a drill has to touch category state.
pub fn categories_for(test_type: TestType) -> &'static [TrainingCategory] {
    use TrainingCategory::*;
    match test_type {
        TestType::TranslationToWord => &[Meaning],
        TestType::WordToTranslation => &[Meaning],
        TestType::WordConstructor => &[Meaning, Spelling],
        TestType::Listening => &[Spelling, Listening],
        TestType::Sprint => &[Meaning],
    }
}
