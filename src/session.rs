//! Full-game sessions: the agent against a generated board.

use std::collections::HashSet;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    agent::{AgentConfig, MoveKind, SapperAgent},
    knowledge::InferenceDepth,
    minesweeper::{Board, Cell, Game, GameOutcome, Reveal},
};

/// Configuration for a game session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
    /// Seeds the board; the agent is seeded with `seed + 1` so mine
    /// placement and fallback guessing draw from independent streams.
    pub seed: Option<u64>,
    pub depth: InferenceDepth,
    /// Stop after this many moves, leaving the outcome unset. `None`
    /// plays to the end (a session is bounded by the cell count anyway).
    pub max_moves: Option<usize>,
}

impl SessionConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        Self {
            height,
            width,
            mines,
            seed: None,
            depth: InferenceDepth::default(),
            max_moves: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_depth(mut self, depth: InferenceDepth) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(8, 8, 8)
    }
}

/// One move as the session saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub cell: Cell,
    pub kind: MoveKind,
    /// Adjacent-mine count for a clear reveal; `None` when the move
    /// tripped a mine.
    pub nearby: Option<usize>,
}

/// Outcome and move log of a finished (or truncated) session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// `None` only when the session was cut off by `max_moves`.
    pub outcome: Option<GameOutcome>,
    pub moves: Vec<MoveRecord>,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Mines the agent proved and flagged
    pub flagged: usize,
}

/// A single agent-vs-board game.
///
/// Each turn: flag every mine the agent has proven, stop when the board is
/// won or lost, otherwise open the agent's chosen cell and feed the
/// observation back.
pub struct GameSession {
    config: SessionConfig,
    game: Game,
    agent: SapperAgent,
    flagged: HashSet<Cell>,
    moves: Vec<MoveRecord>,
}

impl GameSession {
    /// Generate a board from the config and set up a fresh agent.
    ///
    /// # Errors
    ///
    /// Returns an error when the board configuration is invalid.
    pub fn new(config: SessionConfig) -> crate::Result<Self> {
        let mut board_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        let board = Board::generate(config.height, config.width, config.mines, &mut board_rng)?;

        let mut agent_config = AgentConfig::new(config.height, config.width).with_depth(config.depth);
        if let Some(seed) = config.seed {
            agent_config = agent_config.with_seed(seed.wrapping_add(1));
        }

        Ok(GameSession {
            config,
            game: Game::new(board),
            agent: SapperAgent::new(agent_config),
            flagged: HashSet::new(),
            moves: Vec::new(),
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn agent(&self) -> &SapperAgent {
        &self.agent
    }

    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    /// Advance the session by one move. Returns the move made, or `None`
    /// when the game is over (or the move budget is spent).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoMovesAvailable`] if the agent has no move
    /// while the game is still undecided, which indicates an engine bug.
    pub fn step(&mut self) -> crate::Result<Option<MoveRecord>> {
        self.flag_proven_mines();
        if self.game.outcome().is_some() {
            return Ok(None);
        }
        if let Some(max) = self.config.max_moves
            && self.moves.len() >= max
        {
            return Ok(None);
        }

        let Some((cell, kind)) = self.agent.select_move() else {
            return Err(crate::Error::NoMovesAvailable);
        };

        let record = match self.game.reveal(cell)? {
            Reveal::Clear(count) => {
                self.agent.observe(cell, count);
                MoveRecord {
                    cell,
                    kind,
                    nearby: Some(count),
                }
            }
            Reveal::Mine => MoveRecord {
                cell,
                kind,
                nearby: None,
            },
        };
        self.moves.push(record);
        Ok(Some(record))
    }

    /// Play the session to completion and summarize it.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`GameSession::step`].
    pub fn run(&mut self) -> crate::Result<GameRecord> {
        while self.step()?.is_some() {}
        Ok(self.record())
    }

    /// Summarize the session as played so far.
    pub fn record(&self) -> GameRecord {
        let safe_moves = self
            .moves
            .iter()
            .filter(|entry| entry.kind == MoveKind::Safe)
            .count();
        GameRecord {
            outcome: self.game.outcome(),
            moves: self.moves.clone(),
            safe_moves,
            random_moves: self.moves.len() - safe_moves,
            flagged: self.flagged.len(),
        }
    }

    /// Flag mines the knowledge base has proven since the last turn.
    /// Flagging the last mine wins the game.
    fn flag_proven_mines(&mut self) {
        let proven: Vec<Cell> = self
            .agent
            .knowledge()
            .mines()
            .iter()
            .copied()
            .filter(|mine| !self.flagged.contains(mine))
            .collect();
        for mine in proven {
            self.game.flag(mine);
            self.flagged.insert(mine);
        }
    }
}

/// Convenience: build a session from `config` and play it out.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the session stalls.
pub fn play_game(config: SessionConfig) -> crate::Result<GameRecord> {
    GameSession::new(config)?.run()
}
