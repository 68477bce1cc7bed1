//! Leaf scoring for the game search.
//!
//! Every value here is from X's point of view: positive favours X.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tapatan::lines::open_twos;
use crate::tapatan::state::GameState;
use crate::types::{manhattan, Player};

/// Largest magnitude a cutoff estimate may take, so it never ties or beats a real
/// win or loss.
pub const MAX_ESTIMATE: f64 = 1.0 - 1e-6;

/// Tuning constants for [`heuristic`]. None of the values carry meaning beyond
/// the ordering they induce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub win: f64,
    pub center: f64,
    pub open_two: f64,
    pub mobility: f64,
    pub adjacent_pair: f64,
    pub gap_pair: f64,
    /// Divisor applied at a depth cutoff. Must be positive.
    pub scale: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            win: 100.0,
            center: 3.0,
            open_two: 5.0,
            mobility: 0.5,
            adjacent_pair: 2.0,
            gap_pair: 1.0,
            scale: 100.0,
        }
    }
}

impl EvalWeights {
    /// Load weights from JSON. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read weights file {}", path.display()),
            source,
        })?;
        let weights: Self = serde_json::from_str(&data)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Every weight must be finite and `scale` strictly positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("win", self.win),
            ("center", self.center),
            ("open_two", self.open_two),
            ("mobility", self.mobility),
            ("adjacent_pair", self.adjacent_pair),
            ("gap_pair", self.gap_pair),
            ("scale", self.scale),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidWeight {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
        }
        if self.scale <= 0.0 {
            return Err(Error::InvalidWeight {
                field: "scale",
                value: self.scale,
                reason: "must be greater than 0",
            });
        }
        Ok(())
    }
}

/// How a position is scored when the search stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluator {
    /// Strict win/draw/loss; a non-terminal cutoff scores 0.
    Utility,
    /// Strict utility at terminal nodes, weighted estimate at a cutoff.
    Heuristic(EvalWeights),
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::Heuristic(EvalWeights::default())
    }
}

impl Evaluator {
    /// Score a leaf. `terminal` tells whether the search stopped because the game is over.
    ///
    /// Cutoff estimates are clamped to `±MAX_ESTIMATE`, whatever the weights.
    #[inline]
    pub fn score(&self, state: &GameState, terminal: bool) -> f64 {
        if terminal {
            return utility(state);
        }
        match self {
            Evaluator::Utility => 0.0,
            Evaluator::Heuristic(w) => {
                let v = heuristic(state, w) / w.scale;
                if v.is_nan() {
                    0.0
                } else {
                    v.clamp(-MAX_ESTIMATE, MAX_ESTIMATE)
                }
            }
        }
    }
}

/// +1 if X has three in a row, -1 if O does, 0 otherwise.
#[inline]
pub fn utility(state: &GameState) -> f64 {
    match state.winner() {
        Some(Player::X) => 1.0,
        Some(Player::O) => -1.0,
        None => 0.0,
    }
}

#[inline]
fn signed(player: Player) -> f64 {
    match player {
        Player::X => 1.0,
        Player::O => -1.0,
    }
}

/// Weighted sum of win bonus, centre occupancy, open twos, mobility and proximity.
///
/// Swapping every X for an O (and vice versa) negates the result.
#[allow(clippy::cast_precision_loss)]
pub fn heuristic(state: &GameState, w: &EvalWeights) -> f64 {
    if let Some(p) = state.winner() {
        return signed(p) * w.win;
    }

    let board = &state.board;
    let mut value = 0.0;

    if let Some(p) = board.get(4) {
        value += signed(p) * w.center;
    }

    for p in [Player::X, Player::O] {
        let s = signed(p);
        value += s * w.open_two * open_twos(board, p) as f64;
        value += s * w.mobility * state.moves_for(p).len() as f64;
        value += s * proximity(state, p, w);
    }

    value
}

/// Pairs of `player`'s pieces at Manhattan distance 1 or 2.
fn proximity(state: &GameState, player: Player, w: &EvalWeights) -> f64 {
    let pieces: Vec<u8> = state.board.pieces_of(player).collect();
    let mut value = 0.0;
    for (i, &a) in pieces.iter().enumerate() {
        for &b in &pieces[i + 1..] {
            match manhattan(a, b) {
                1 => value += w.adjacent_pair,
                2 => value += w.gap_pair,
                _ => {}
            }
        }
    }
    value
}
