use serde::Serialize;
use tracing::debug;

use crate::tapatan::eval::Evaluator;
use crate::tapatan::state::{GameState, Move};
use crate::types::Player;

#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    pub max_depth: u8,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    /// Minimax value from X's point of view.
    pub value: f64,
    /// `None` when the root is terminal or the depth limit is 0.
    pub best_move: Option<Move>,
    /// Nodes visited, root included.
    pub nodes: u64,
    pub depth: u8,
}

/// X maximizes, O minimizes.
#[inline]
pub fn maximizing_for(player: Player) -> bool {
    player == Player::X
}

/// Depth-limited minimax. Moves are tried in generation order and a later move only
/// replaces the current best when strictly better, so results are deterministic.
#[derive(Debug, Clone)]
pub struct Minimax {
    limits: SearchLimits,
    evaluator: Evaluator,
    nodes: u64,
}

impl Minimax {
    pub fn new(limits: SearchLimits, evaluator: Evaluator) -> Self {
        Self {
            limits,
            evaluator,
            nodes: 0,
        }
    }

    /// Alpha-beta search from `state`; `maximizing` says whether the root player
    /// maximizes.
    pub fn search(&mut self, state: &GameState, maximizing: bool) -> SearchResult {
        self.nodes = 0;
        let depth = self.limits.max_depth;
        let (value, best_move) =
            self.alphabeta(state, depth, f64::NEG_INFINITY, f64::INFINITY, maximizing);
        debug!(
            value,
            best_move = ?best_move,
            nodes = self.nodes,
            depth,
            maximizing,
            "minimax finished"
        );
        SearchResult {
            value,
            best_move,
            nodes: self.nodes,
            depth,
        }
    }

    /// Same search without pruning. Returns the same value as [`Minimax::search`];
    /// only the node count differs.
    pub fn search_unpruned(&mut self, state: &GameState, maximizing: bool) -> SearchResult {
        self.nodes = 0;
        let depth = self.limits.max_depth;
        let (value, best_move) = self.plain(state, depth, maximizing);
        SearchResult {
            value,
            best_move,
            nodes: self.nodes,
            depth,
        }
    }

    fn alphabeta(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;
        let moves = state.legal_moves();
        let terminal = state.winner().is_some() || moves.is_empty();
        if depth == 0 || terminal {
            return (self.evaluator.score(state, terminal), None);
        }

        let mut best_move = None;
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let (v, _) = self.alphabeta(&state.apply(mv), depth - 1, alpha, beta, false);
                if v > best {
                    best = v;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let (v, _) = self.alphabeta(&state.apply(mv), depth - 1, alpha, beta, true);
                if v < best {
                    best = v;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        }
    }

    fn plain(&mut self, state: &GameState, depth: u8, maximizing: bool) -> (f64, Option<Move>) {
        self.nodes += 1;
        let moves = state.legal_moves();
        let terminal = state.winner().is_some() || moves.is_empty();
        if depth == 0 || terminal {
            return (self.evaluator.score(state, terminal), None);
        }

        let mut best = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_move = None;
        for mv in moves {
            let (v, _) = self.plain(&state.apply(mv), depth - 1, !maximizing);
            let better = if maximizing { v > best } else { v < best };
            if better {
                best = v;
                best_move = Some(mv);
            }
        }
        (best, best_move)
    }
}

/// Best move for the root player using the default heuristic evaluator.
///
/// Callers must check for `None` before applying: it is returned for terminal
/// states and for `max_depth == 0`.
pub fn best_move(state: &GameState, max_depth: u8, maximizing: bool) -> (f64, Option<Move>) {
    let mut search = Minimax::new(SearchLimits { max_depth }, Evaluator::default());
    let res = search.search(state, maximizing);
    (res.value, res.best_move)
}
