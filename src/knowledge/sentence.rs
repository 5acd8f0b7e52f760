//! Logical sentences over board cells

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::minesweeper::Cell;

/// A logical statement about the game: "this set of cells contains exactly
/// `count` mines".
///
/// Invariant: `count <= cells.len()` after every mutation. A sentence with
/// no cells carries no information; the knowledge base purges such
/// sentences rather than querying them.
///
/// Equality is structural: two sentences are equal iff their cell sets and
/// counts both match. The cell set is ordered so that iteration, display,
/// and queries are reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Create a sentence asserting that exactly `count` of `cells` are
    /// mines. A count exceeding the cell-set size indicates contradictory
    /// input and is clamped to preserve the invariant.
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "sentence count {count} exceeds cell-set size {}",
            cells.len()
        );
        let count = count.min(cells.len());
        Sentence { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells known to be mines: the full cell set iff every remaining
    /// cell must be a mine (`count == |cells|`).
    ///
    /// `None` means "no conclusion", which is distinct from concluding an
    /// empty set; an empty sentence yields no conclusion either way.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// All cells known to be safe: the full cell set iff no remaining cell
    /// can be a mine (`count == 0`).
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        if !self.cells.is_empty() && self.count == 0 {
            Some(&self.cells)
        } else {
            None
        }
    }

    /// Record that `cell` is a mine: remove it and decrement the count.
    /// No-op when `cell` is not a member.
    ///
    /// Removing a cell from a zero-count sentence would mean the same cell
    /// was concluded both safe and mined; the count clamps at zero (with a
    /// debug assertion) to keep the invariant under contradictory input.
    pub fn resolve_as_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(self.count > 0, "resolving {cell} as mine in {self}");
            self.count = self.count.saturating_sub(1);
        }
    }

    /// Record that `cell` is safe: remove it, count unchanged. No-op when
    /// `cell` is not a member.
    pub fn resolve_as_safe(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            debug_assert!(
                self.count <= self.cells.len(),
                "resolving {cell} as safe broke {self}"
            );
            self.count = self.count.min(self.cells.len());
        }
    }

    /// Whether this sentence's cells are a subset of `other`'s.
    pub fn is_subset_of(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, col: usize) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn known_mines_only_when_count_fills_the_set() {
        let full = Sentence::new([cell(0, 0), cell(0, 1)], 2);
        assert_eq!(
            full.known_mines().map(|cells| cells.len()),
            Some(2),
            "count == |cells| concludes every cell is a mine"
        );
        assert!(full.known_safes().is_none());

        let partial = Sentence::new([cell(0, 0), cell(0, 1)], 1);
        assert!(partial.known_mines().is_none());
        assert!(partial.known_safes().is_none());
    }

    #[test]
    fn known_safes_only_when_count_is_zero() {
        let safe = Sentence::new([cell(0, 0), cell(0, 1)], 0);
        assert_eq!(safe.known_safes().map(|cells| cells.len()), Some(2));
        assert!(safe.known_mines().is_none());
    }

    #[test]
    fn empty_sentence_concludes_nothing() {
        let empty = Sentence::new([], 0);
        assert!(empty.is_empty());
        assert!(empty.known_mines().is_none());
        assert!(empty.known_safes().is_none());
    }

    #[test]
    fn resolve_as_mine_shrinks_set_and_count() {
        let mut sentence = Sentence::new([cell(0, 0), cell(0, 1), cell(1, 1)], 2);
        sentence.resolve_as_mine(cell(0, 1));
        assert_eq!(sentence, Sentence::new([cell(0, 0), cell(1, 1)], 1));

        // Absent cell: idempotent no-op.
        sentence.resolve_as_mine(cell(0, 1));
        assert_eq!(sentence, Sentence::new([cell(0, 0), cell(1, 1)], 1));
    }

    #[test]
    fn resolve_as_safe_shrinks_set_only() {
        let mut sentence = Sentence::new([cell(0, 0), cell(0, 1), cell(1, 1)], 1);
        sentence.resolve_as_safe(cell(0, 0));
        assert_eq!(sentence, Sentence::new([cell(0, 1), cell(1, 1)], 1));

        sentence.resolve_as_safe(cell(0, 0));
        assert_eq!(sentence, Sentence::new([cell(0, 1), cell(1, 1)], 1));
    }

    #[test]
    fn count_invariant_holds_after_mutations() {
        let mut sentence = Sentence::new([cell(0, 0), cell(0, 1), cell(1, 0)], 2);
        sentence.resolve_as_mine(cell(0, 0));
        assert!(sentence.count() <= sentence.cells().len());
        sentence.resolve_as_safe(cell(0, 1));
        assert!(sentence.count() <= sentence.cells().len());
        sentence.resolve_as_mine(cell(1, 0));
        assert!(sentence.count() <= sentence.cells().len());
        assert!(sentence.is_empty());
    }

    #[test]
    fn equality_is_structural() {
        let a = Sentence::new([cell(0, 0), cell(0, 1)], 1);
        let b = Sentence::new([cell(0, 1), cell(0, 0)], 1);
        let c = Sentence::new([cell(0, 0), cell(0, 1)], 2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_orders_cells() {
        let sentence = Sentence::new([cell(1, 0), cell(0, 1)], 1);
        assert_eq!(sentence.to_string(), "{(0, 1), (1, 0)} = 1");
    }
}
