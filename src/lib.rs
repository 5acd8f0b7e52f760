//! Knowledge-based Minesweeper agent
//!
//! This crate provides:
//! - Complete Minesweeper board and game implementation
//! - A propositional knowledge base: sentences of the form "exactly N of
//!   these cells are mines", resolution, and subset inference
//! - An agent that prefers proven-safe moves and falls back to seeded
//!   random guessing
//! - Session running, batch statistics, and a CLI for both

pub mod agent;
pub mod analysis;
pub mod cli;
pub mod error;
pub mod knowledge;
pub mod minesweeper;
pub mod session;

pub use agent::{AgentConfig, MoveKind, SapperAgent};
pub use analysis::{BatchStats, OutcomeDistribution};
pub use error::{Error, Result};
pub use knowledge::{InferenceDepth, KnowledgeBase, Sentence};
pub use minesweeper::{Board, Cell, Game, GameOutcome, Reveal};
pub use session::{GameRecord, GameSession, MoveRecord, SessionConfig, play_game};
