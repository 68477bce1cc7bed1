//! 8-puzzle: board representation, Manhattan heuristic and A* search.

pub mod astar;
pub mod scramble;
pub mod tiles;

pub use astar::{solve, SolveOutcome, Step};
pub use scramble::{scramble, scramble_with};
pub use tiles::{GoalIndex, Tiles};
