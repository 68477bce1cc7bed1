//! Tapatan: three-in-a-row with three pieces a side that only slide.

pub mod adjacency;
pub mod board;
pub mod eval;
pub mod lines;
pub mod minimax;
pub mod state;

pub use adjacency::Adjacency;
pub use board::Board;
pub use eval::{heuristic, utility, EvalWeights, Evaluator, MAX_ESTIMATE};
pub use lines::WINNING_LINES;
pub use minimax::{best_move, maximizing_for, Minimax, SearchLimits, SearchResult};
pub use state::{apply_move, is_terminal, legal_moves, winner, GameState, Move, PIECES_PER_PLAYER};
