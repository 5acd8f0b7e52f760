//! Propositional knowledge base for Minesweeper deduction

pub mod engine;
pub mod sentence;

pub use engine::{InferenceDepth, KnowledgeBase};
pub use sentence::Sentence;
