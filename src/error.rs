//! Error types for parsing and validating boards at the crate boundary.
//!
//! The search engines themselves are infallible.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("board text has {got} cells, expected 9 in '{context}'")]
    InvalidBoardLength { got: usize, context: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("tile {tile} appears more than once in '{context}'")]
    DuplicateTile { tile: u8, context: String },

    #[error("invalid piece counts: X={x_count}, O={o_count} (each side needs exactly 3)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("invalid move: no {player} piece at position {position}")]
    NotYourPiece { player: char, position: u8 },

    #[error("invalid move: position {position} is already occupied")]
    Occupied { position: u8 },

    #[error("invalid move: {to} is not adjacent to {from}")]
    NotAdjacent { from: u8, to: u8 },

    #[error("invalid weight {field}={value}: {reason}")]
    InvalidWeight {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown {kind} '{input}'. Expected one of: {expected}")]
    UnknownName {
        kind: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
