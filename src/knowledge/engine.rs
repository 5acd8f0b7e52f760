//! Knowledge-base maintenance and the inference loop

use std::{collections::HashSet, fmt, str::FromStr};

use rand::{Rng, prelude::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::sentence::Sentence;
use crate::minesweeper::{Cell, neighbors};

/// How far each observation propagates through the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InferenceDepth {
    /// Resolution and subset inference run exactly once per observation.
    /// Facts derivable only through newly derived sentences surface on a
    /// later observation.
    SinglePass,
    /// Resolution and subset inference iterate until no new fact or
    /// sentence is produced. Strictly stronger deduction; the default.
    #[default]
    FixedPoint,
}

impl InferenceDepth {
    pub const EXPECTED_TOKENS: &'static str = "fixed-point, single-pass";
}

impl fmt::Display for InferenceDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceDepth::SinglePass => write!(f, "single-pass"),
            InferenceDepth::FixedPoint => write!(f, "fixed-point"),
        }
    }
}

impl FromStr for InferenceDepth {
    type Err = crate::Error;

    fn from_str(input: &str) -> crate::Result<Self> {
        match input.to_lowercase().as_str() {
            "fixed-point" | "fixed" => Ok(InferenceDepth::FixedPoint),
            "single-pass" | "single" => Ok(InferenceDepth::SinglePass),
            _ => Err(crate::Error::ParseInferenceDepth {
                input: input.to_string(),
                expected: Self::EXPECTED_TOKENS.to_string(),
            }),
        }
    }
}

/// The agent's knowledge about one game: proven-safe and proven-mine cells,
/// the cells already opened, and the live sentences everything else is
/// deduced from.
///
/// Sentences are kept in insertion order. The order carries no logical
/// meaning, but it determines which sentence a query such as
/// [`KnowledgeBase::safe_move`] consults first, so it is fixed rather than
/// left to hash iteration.
///
/// Invariants, restored after every operation:
/// - `moves_made` and `mines` are disjoint, as are `safes` and `mines`;
/// - every live sentence satisfies `count <= |cells|`;
/// - once propagation settles, no live sentence mentions a cell whose
///   status is already known.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Sentence>,
    depth: InferenceDepth,
}

impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        Self::with_depth(height, width, InferenceDepth::default())
    }

    pub fn with_depth(height: usize, width: usize, depth: InferenceDepth) -> Self {
        assert!(
            height > 0 && width > 0,
            "knowledge base requires non-zero board dimensions"
        );
        KnowledgeBase {
            height,
            width,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
            depth,
        }
    }

    pub fn depth(&self) -> InferenceDepth {
        self.depth
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven mine-free.
    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    /// Cells proven to be mines.
    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// Live sentences, in insertion order.
    pub fn knowledge(&self) -> &[Sentence] {
        &self.knowledge
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Record that `cell` is proven safe and resolve it out of every live
    /// sentence. Re-marking a known-safe cell is a no-op. Does not trigger
    /// further inference by itself.
    pub fn mark_safe(&mut self, cell: Cell) {
        assert!(self.in_bounds(cell), "cell {cell} is outside the board");
        debug_assert!(
            !self.mines.contains(&cell),
            "cell {cell} marked safe but already proven a mine"
        );
        if !self.safes.insert(cell) {
            return;
        }
        for sentence in &mut self.knowledge {
            sentence.resolve_as_safe(cell);
        }
        self.purge_empty();
    }

    /// Record that `cell` is proven to be a mine and resolve it out of
    /// every live sentence. Re-marking is a no-op.
    pub fn mark_mine(&mut self, cell: Cell) {
        assert!(self.in_bounds(cell), "cell {cell} is outside the board");
        debug_assert!(
            !self.safes.contains(&cell) && !self.moves_made.contains(&cell),
            "cell {cell} marked as mine but already proven safe"
        );
        if !self.mines.insert(cell) {
            return;
        }
        for sentence in &mut self.knowledge {
            sentence.resolve_as_mine(cell);
        }
        self.purge_empty();
    }

    /// Ingest one observation: `cell` was opened and has `count` mines
    /// among its 8 neighbors.
    ///
    /// The cell is recorded as played and safe, a new sentence is built
    /// from its unresolved neighbors, and the inference loop runs — once,
    /// or to a fixed point, per [`InferenceDepth`].
    ///
    /// Neighbors already proven to be mines are excluded from the new
    /// sentence's cell set and subtracted from its count; neighbors already
    /// proven safe or already opened are excluded with the count untouched.
    /// A duplicate observation is tolerated and leaves the state unchanged
    /// apart from a vacuous re-mark.
    ///
    /// # Panics
    ///
    /// Out-of-range coordinates are a caller contract violation and panic.
    pub fn observe(&mut self, cell: Cell, count: usize) {
        assert!(self.in_bounds(cell), "cell {cell} is outside the board");
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut cells = Vec::new();
        let mut remaining = count;
        for neighbor in neighbors(self.height, self.width, cell) {
            if self.mines.contains(&neighbor) {
                remaining = remaining.saturating_sub(1);
            } else if !self.safes.contains(&neighbor) && !self.moves_made.contains(&neighbor) {
                cells.push(neighbor);
            }
        }

        let sentence = Sentence::new(cells, remaining);
        if !sentence.is_empty() && !self.knowledge.contains(&sentence) {
            self.knowledge.push(sentence);
        }

        self.propagate();
    }

    /// Run the inference loop: resolve conclusions, fold them back in, and
    /// derive new sentences by subset difference.
    fn propagate(&mut self) {
        loop {
            let progressed = self.propagate_once();
            if self.depth == InferenceDepth::SinglePass || !progressed {
                break;
            }
        }
    }

    /// One resolution + subset-inference pass. Returns whether any new
    /// fact or sentence was produced.
    fn propagate_once(&mut self) -> bool {
        let mut progressed = false;

        // Resolution: collect every definite conclusion, then fold each
        // back in. Applying a mark resolves it out of all sentences, which
        // can make further sentences conclusive; those surface on the next
        // iteration in fixed-point mode.
        let mut new_safes: Vec<Cell> = Vec::new();
        let mut new_mines: Vec<Cell> = Vec::new();
        for sentence in &self.knowledge {
            if let Some(cells) = sentence.known_safes() {
                new_safes.extend(cells.iter().copied());
            }
            if let Some(cells) = sentence.known_mines() {
                new_mines.extend(cells.iter().copied());
            }
        }
        for cell in new_safes {
            if !self.safes.contains(&cell) {
                progressed = true;
                self.mark_safe(cell);
            }
        }
        for cell in new_mines {
            if !self.mines.contains(&cell) {
                progressed = true;
                self.mark_mine(cell);
            }
        }

        // Subset inference: for every ordered pair A ⊆ B of distinct live
        // sentences, the cells unique to B hold exactly B.count - A.count
        // mines.
        let mut derived: Vec<Sentence> = Vec::new();
        for (i, subset) in self.knowledge.iter().enumerate() {
            for (j, superset) in self.knowledge.iter().enumerate() {
                if i == j || subset.is_empty() || !subset.is_subset_of(superset) {
                    continue;
                }
                debug_assert!(
                    subset.count() <= superset.count(),
                    "subset {subset} claims more mines than superset {superset}"
                );
                let difference = Sentence::new(
                    superset
                        .cells()
                        .difference(subset.cells())
                        .copied()
                        .collect::<Vec<_>>(),
                    superset.count().saturating_sub(subset.count()),
                );
                if !difference.is_empty()
                    && !self.knowledge.contains(&difference)
                    && !derived.contains(&difference)
                {
                    derived.push(difference);
                }
            }
        }
        if !derived.is_empty() {
            progressed = true;
            self.knowledge.extend(derived);
        }

        progressed
    }

    /// Rebuild the sentence list, dropping emptied sentences and
    /// structural duplicates (resolution can collapse a superset onto a
    /// sentence that is already present), then swap it in.
    fn purge_empty(&mut self) {
        let mut live: Vec<Sentence> = Vec::with_capacity(self.knowledge.len());
        for sentence in self.knowledge.drain(..) {
            if !sentence.is_empty() && !live.contains(&sentence) {
                live.push(sentence);
            }
        }
        self.knowledge = live;
    }

    /// A proven-safe cell that has not been opened yet, if any.
    ///
    /// Prefers the row-major smallest candidate from `safes` so that
    /// seeded games replay identically; falls back to scanning live
    /// sentences for an unplayed conclusive safe cell (which only yields
    /// anything in single-pass mode, where conclusions can be pending).
    pub fn safe_move(&self) -> Option<Cell> {
        if let Some(cell) = self
            .safes
            .iter()
            .copied()
            .filter(|cell| !self.moves_made.contains(cell))
            .min()
        {
            return Some(cell);
        }

        for sentence in &self.knowledge {
            if let Some(cells) = sentence.known_safes()
                && let Some(cell) = cells
                    .iter()
                    .copied()
                    .find(|cell| !self.moves_made.contains(cell))
            {
                return Some(cell);
            }
        }
        None
    }

    /// A uniformly random cell that has not been opened and is not a known
    /// mine, or `None` when no such cell remains.
    pub fn random_move<R: Rng>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<Cell> = (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| Cell::new(row, col)))
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates.choose(rng).copied()
    }
}
