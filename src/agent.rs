//! Minesweeper agent pairing deduction with a seeded random fallback.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    knowledge::{InferenceDepth, KnowledgeBase},
    minesweeper::Cell,
};

/// Configuration for creating a sapper agent.
///
/// # Examples
///
/// ```
/// use sapper::{AgentConfig, InferenceDepth};
///
/// let config = AgentConfig::new(8, 8)
///     .with_seed(42)
///     .with_depth(InferenceDepth::SinglePass);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Board height the agent reasons over
    pub height: usize,
    /// Board width the agent reasons over
    pub width: usize,
    /// How far each observation propagates
    pub depth: InferenceDepth,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Create a configuration for the given board dimensions.
    ///
    /// Uses default values for other parameters:
    /// - Depth: `InferenceDepth::FixedPoint`
    /// - Seed: None (non-deterministic)
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            depth: InferenceDepth::default(),
            seed: None,
        }
    }

    /// Set the inference depth.
    pub fn with_depth(mut self, depth: InferenceDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        // Classic beginner board.
        Self::new(8, 8)
    }
}

/// How a move was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Proven safe by the knowledge base.
    Safe,
    /// No safe cell was known; chosen uniformly among unknown-risk cells.
    Random,
}

/// Knowledge-based Minesweeper agent.
///
/// Owns the knowledge base for one game plus the RNG used for fallback
/// moves. Knowledge never survives a game; build a fresh agent per board.
pub struct SapperAgent {
    knowledge: KnowledgeBase,
    /// Random number generator for fallback moves
    rng: Option<StdRng>,
    config: AgentConfig,
}

impl std::fmt::Debug for SapperAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SapperAgent")
            .field("config", &self.config)
            .field("moves_made", &self.knowledge.moves_made().len())
            .field("sentences", &self.knowledge.knowledge().len())
            .finish()
    }
}

impl SapperAgent {
    pub fn new(config: AgentConfig) -> Self {
        let rng = config.seed.map(StdRng::seed_from_u64);
        SapperAgent {
            knowledge: KnowledgeBase::with_depth(config.height, config.width, config.depth),
            rng,
            config,
        }
    }

    /// Set or reset the agent's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        self.rng = Some(rng);
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Read access to the agent's knowledge base.
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Report a revealed cell and its adjacent-mine count.
    pub fn observe(&mut self, cell: Cell, count: usize) {
        self.knowledge.observe(cell, count);
    }

    /// Feed in outside knowledge that `cell` is a mine (e.g. a human flag).
    pub fn mark_mine(&mut self, cell: Cell) {
        self.knowledge.mark_mine(cell);
    }

    /// Feed in outside knowledge that `cell` is safe.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.knowledge.mark_safe(cell);
    }

    /// Choose the next cell to open: a proven-safe cell when one exists,
    /// otherwise a uniformly random unknown-risk cell. `None` once every
    /// non-mine cell has been opened.
    pub fn select_move(&mut self) -> Option<(Cell, MoveKind)> {
        if let Some(cell) = self.knowledge.safe_move() {
            return Some((cell, MoveKind::Safe));
        }

        if self.rng.is_none() {
            self.reseed(None);
        }
        let rng = self.rng.as_mut()?;
        self.knowledge
            .random_move(rng)
            .map(|cell| (cell, MoveKind::Random))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_deduction_over_chance() {
        let mut agent = SapperAgent::new(AgentConfig::new(3, 3).with_seed(7));
        agent.observe(Cell::new(1, 1), 0);
        let (cell, kind) = agent.select_move().expect("safe neighbors exist");
        assert_eq!(kind, MoveKind::Safe);
        assert!(agent.knowledge().safes().contains(&cell));
    }

    #[test]
    fn falls_back_to_a_random_move() {
        let mut agent = SapperAgent::new(AgentConfig::new(3, 3).with_seed(7));
        let (_, kind) = agent.select_move().expect("nothing is known yet");
        assert_eq!(kind, MoveKind::Random);
    }

    #[test]
    fn seeded_agents_replay_identically() {
        let picks = |seed: u64| {
            let mut agent = SapperAgent::new(AgentConfig::new(4, 4).with_seed(seed));
            (0..5).map(|_| agent.select_move()).collect::<Vec<_>>()
        };
        assert_eq!(picks(99), picks(99));
    }

    #[test]
    fn no_move_when_board_is_exhausted() {
        let mut agent = SapperAgent::new(AgentConfig::new(1, 2).with_seed(7));
        agent.observe(Cell::new(0, 0), 1);
        assert_eq!(
            agent.select_move(),
            None,
            "the only unopened cell is a known mine"
        );
    }
}
