//! Minesweeper game implementation

pub mod board;
pub mod game;

pub use board::{Board, Cell, neighbors};
pub use game::{Game, GameOutcome, Reveal};
