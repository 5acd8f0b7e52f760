//! High-level game management on top of the ground-truth board

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell};

/// Terminal outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Won,
    Lost { mine: Cell },
}

/// Result of revealing a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// The cell was clear; carries its adjacent-mine count.
    Clear(usize),
    /// The cell was a mine. The game is over.
    Mine,
}

/// A game in progress: the board plus the set of revealed cells and the
/// terminal outcome once one is reached.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    revealed: HashSet<Cell>,
    outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            revealed: HashSet::new(),
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn revealed(&self) -> &HashSet<Cell> {
        &self.revealed
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Reveal `cell`. A mine ends the game as a loss; a clear cell yields
    /// its adjacent-mine count. Revealing the last clear cell wins.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once an outcome is set and
    /// [`crate::Error::AlreadyRevealed`] for a duplicate reveal.
    ///
    /// # Panics
    ///
    /// Out-of-range coordinates are a caller contract violation and panic.
    pub fn reveal(&mut self, cell: Cell) -> crate::Result<Reveal> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if self.revealed.contains(&cell) {
            return Err(crate::Error::AlreadyRevealed { cell });
        }

        if self.board.is_mine(cell) {
            self.outcome = Some(GameOutcome::Lost { mine: cell });
            return Ok(Reveal::Mine);
        }

        let count = self.board.nearby_mines(cell);
        self.revealed.insert(cell);
        if self.all_clear() {
            self.outcome = Some(GameOutcome::Won);
        }
        Ok(Reveal::Clear(count))
    }

    /// Flag `cell` as a found mine. Flagging the full mine set wins.
    pub fn flag(&mut self, cell: Cell) {
        self.board.flag(cell);
        if self.outcome.is_none() && self.board.won() {
            self.outcome = Some(GameOutcome::Won);
        }
    }

    fn all_clear(&self) -> bool {
        let cells = self.board.height() * self.board.width();
        self.revealed.len() == cells - self.board.num_mines()
    }

    /// Render the player's view: counts for revealed cells, `F` for flags,
    /// `*` for the tripped mine on a loss, `.` elsewhere.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.board.height() {
            for col in 0..self.board.width() {
                let cell = Cell::new(row, col);
                let glyph = if let Some(GameOutcome::Lost { mine }) = self.outcome
                    && mine == cell
                {
                    '*'
                } else if self.revealed.contains(&cell) {
                    char::from_digit(self.board.nearby_mines(cell) as u32, 10).unwrap_or('?')
                } else if self.board.flagged().contains(&cell) {
                    'F'
                } else {
                    '.'
                };
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
