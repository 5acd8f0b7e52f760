//! Error types for the sapper crate

use thiserror::Error;

use crate::minesweeper::Cell;

/// Main error type for the sapper crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board dimensions: {height}x{width} (both must be non-zero)")]
    InvalidDimensions { height: usize, width: usize },

    #[error("too many mines: {mines} requested for a board with {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("game already over")]
    GameOver,

    #[error("cell {cell} has already been revealed")]
    AlreadyRevealed { cell: Cell },

    #[error("no moves available")]
    NoMovesAvailable,

    #[error("invalid inference depth '{input}'. Expected one of: {expected}")]
    ParseInferenceDepth { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
