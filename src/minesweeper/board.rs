//! Ground-truth board representation and basic queries

use std::{collections::HashSet, fmt};

use rand::{rngs::StdRng, seq::index};
use serde::{Deserialize, Serialize};

/// A single grid coordinate, 0-indexed from the top-left corner.
///
/// Two cells with equal coordinates are the same cell; `Cell` is a plain
/// value type and implements `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Iterate the 8-neighborhood of `cell` (Chebyshev distance 1, the cell
/// itself excluded), clipped to a `height` x `width` board.
pub fn neighbors(height: usize, width: usize, cell: Cell) -> impl Iterator<Item = Cell> {
    let row_start = cell.row.saturating_sub(1);
    let row_end = (cell.row + 1).min(height.saturating_sub(1));
    let col_start = cell.col.saturating_sub(1);
    let col_end = (cell.col + 1).min(width.saturating_sub(1));

    (row_start..=row_end)
        .flat_map(move |row| (col_start..=col_end).map(move |col| Cell::new(row, col)))
        .filter(move |&candidate| candidate != cell)
}

/// Ground truth of a single game: where the mines actually are.
///
/// The mine set is fixed at construction and never changes; the only mutable
/// state is the set of mines the player has flagged, which exists solely to
/// answer [`Board::won`].
#[derive(Debug, Clone)]
pub struct Board {
    height: usize,
    width: usize,
    mines: HashSet<Cell>,
    found: HashSet<Cell>,
}

impl Board {
    /// Generate a board with `num_mines` mines placed uniformly at random
    /// without replacement, using the caller's RNG for reproducibility.
    ///
    /// # Errors
    ///
    /// Returns an error for zero-sized dimensions or `num_mines` exceeding
    /// the cell count.
    pub fn generate(
        height: usize,
        width: usize,
        num_mines: usize,
        rng: &mut StdRng,
    ) -> crate::Result<Self> {
        Self::validate(height, width, num_mines)?;

        // index::sample picks num_mines distinct indices uniformly over all
        // C(height*width, num_mines) subsets.
        let mines = index::sample(rng, height * width, num_mines)
            .iter()
            .map(|idx| Cell::new(idx / width, idx % width))
            .collect();

        Ok(Board {
            height,
            width,
            mines,
            found: HashSet::new(),
        })
    }

    /// Build a board with an explicit mine set. Intended for tests and
    /// scripted scenarios.
    ///
    /// # Errors
    ///
    /// Returns an error for zero-sized dimensions or more mines than cells.
    ///
    /// # Panics
    ///
    /// A mine outside the board is a caller contract violation and panics.
    pub fn with_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> crate::Result<Self> {
        let mines: HashSet<Cell> = mines.into_iter().collect();
        Self::validate(height, width, mines.len())?;
        for mine in &mines {
            assert!(
                mine.row < height && mine.col < width,
                "mine {mine} is outside the {height}x{width} board"
            );
        }

        Ok(Board {
            height,
            width,
            mines,
            found: HashSet::new(),
        })
    }

    fn validate(height: usize, width: usize, num_mines: usize) -> crate::Result<()> {
        if height == 0 || width == 0 {
            return Err(crate::Error::InvalidDimensions { height, width });
        }
        let cells = height * width;
        if num_mines > cells {
            return Err(crate::Error::TooManyMines {
                mines: num_mines,
                cells,
            });
        }
        Ok(())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn num_mines(&self) -> usize {
        self.mines.len()
    }

    /// Whether `cell` lies on this board.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Whether `cell` is a mine.
    ///
    /// # Panics
    ///
    /// Out-of-range coordinates are a caller contract violation and panic.
    pub fn is_mine(&self, cell: Cell) -> bool {
        assert!(self.contains(cell), "cell {cell} is outside the board");
        self.mines.contains(&cell)
    }

    /// Count mines in the 8-neighborhood of `cell`, clipped to the board
    /// boundary. Always in `0..=8`.
    ///
    /// # Panics
    ///
    /// Out-of-range coordinates are a caller contract violation and panic.
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        assert!(self.contains(cell), "cell {cell} is outside the board");
        neighbors(self.height, self.width, cell)
            .filter(|neighbor| self.mines.contains(neighbor))
            .count()
    }

    /// Record that the player has flagged `cell` as a mine.
    ///
    /// # Panics
    ///
    /// Out-of-range coordinates are a caller contract violation and panic.
    pub fn flag(&mut self, cell: Cell) {
        assert!(self.contains(cell), "cell {cell} is outside the board");
        self.found.insert(cell);
    }

    pub fn flagged(&self) -> &HashSet<Cell> {
        &self.found
    }

    /// True iff the flagged set equals the mine set exactly, by membership.
    pub fn won(&self) -> bool {
        self.found == self.mines
    }

    /// Render the ground truth, one row per line, mines as `X`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width * 2 + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.mines.contains(&Cell::new(row, col)) {
                    'X'
                } else {
                    '.'
                });
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}
