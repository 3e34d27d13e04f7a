pub mod category;
pub mod comparator;
pub mod distractors;
pub mod rounds;

// Re-export the main types for convenience
pub use category::{categories_for, TestType, TrainingCategory};
pub use comparator::compare_desirability;
pub use distractors::DistractorGenerator;
pub use rounds::{pseudo_shuffle, RoundSetBuilder};
