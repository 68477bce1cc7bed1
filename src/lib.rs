#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod error;
pub mod puzzle;
pub mod rng;
pub mod tapatan;
pub mod types;

// Re-exports: stable minimal API surface for external callers
pub use crate::error::{Error, Result};
pub use crate::puzzle::{scramble, solve, SolveOutcome, Step, Tiles};
pub use crate::rng::rng_for_instance;
pub use crate::tapatan::{
    apply_move, best_move, is_terminal, legal_moves, winner, Adjacency, Board, EvalWeights,
    Evaluator, GameState, Minimax, Move, SearchLimits, SearchResult,
};
pub use crate::types::{Dir, Player};
