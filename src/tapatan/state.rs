use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::tapatan::adjacency::Adjacency;
use crate::tapatan::board::Board;
use crate::tapatan::lines::line_winner;
use crate::types::{idx_to_rc, Player};

/// Pieces each side owns for the whole game.
pub const PIECES_PER_PLAYER: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: u8, // 0..=8
    pub to: u8,   // 0..=8
}

impl Move {
    #[inline]
    pub const fn new(from: u8, to: u8) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fr, fc) = idx_to_rc(self.from);
        let (tr, tc) = idx_to_rc(self.to);
        write!(f, "({fr}, {fc}) -> ({tr}, {tc})")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub next: Player,
    pub adjacency: Adjacency,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial(Adjacency::default())
    }
}

impl GameState {
    /// Fixed opening layout with X to move.
    #[inline]
    pub fn initial(adjacency: Adjacency) -> Self {
        Self {
            board: Board::initial(),
            next: Player::X,
            adjacency,
        }
    }

    /// Build a state without checking piece counts.
    #[inline]
    pub fn with_board(board: Board, next: Player, adjacency: Adjacency) -> Self {
        Self {
            board,
            next,
            adjacency,
        }
    }

    /// Build a state from external input, requiring three pieces per side.
    pub fn from_board(board: Board, next: Player, adjacency: Adjacency) -> Result<Self> {
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        if x_count != PIECES_PER_PLAYER || o_count != PIECES_PER_PLAYER {
            return Err(Error::InvalidPieceCounts { x_count, o_count });
        }
        Ok(Self::with_board(board, next, adjacency))
    }

    /// Empty cells reachable in one slide from `origin`, in adjacency order.
    pub fn moves_from(&self, origin: u8) -> Vec<u8> {
        self.adjacency
            .neighbors(origin)
            .iter()
            .copied()
            .filter(|&to| self.board.is_empty(to))
            .collect()
    }

    /// Moves for `player` regardless of whose turn it is.
    /// Order: pieces by cell index ascending, then adjacency-list order.
    pub fn moves_for(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::with_capacity(8);
        for from in self.board.pieces_of(player) {
            for &to in self.adjacency.neighbors(from) {
                if self.board.is_empty(to) {
                    moves.push(Move { from, to });
                }
            }
        }
        moves
    }

    #[inline]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.moves_for(self.next)
    }

    /// Check a requested move against the board without applying it.
    pub fn validate_move(&self, mv: Move) -> Result<()> {
        for position in [mv.from, mv.to] {
            if position > 8 {
                return Err(Error::InvalidPosition {
                    position: position as usize,
                });
            }
        }
        if self.board.get(mv.from) != Some(self.next) {
            return Err(Error::NotYourPiece {
                player: self.next.symbol(),
                position: mv.from,
            });
        }
        if !self.board.is_empty(mv.to) {
            return Err(Error::Occupied { position: mv.to });
        }
        if !self.adjacency.connects(mv.from, mv.to) {
            return Err(Error::NotAdjacent {
                from: mv.from,
                to: mv.to,
            });
        }
        Ok(())
    }

    /// New state with the piece relocated and the turn passed. `self` is untouched.
    /// The move is assumed legal; use [`GameState::try_apply`] for external input.
    #[inline]
    pub fn apply(&self, mv: Move) -> GameState {
        debug_assert!(self.validate_move(mv).is_ok(), "illegal move {mv:?}");
        let mut next = *self;
        next.board.relocate(mv.from, mv.to);
        next.next = self.next.other();
        next
    }

    pub fn try_apply(&self, mv: Move) -> Result<GameState> {
        self.validate_move(mv)?;
        Ok(self.apply(mv))
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        line_winner(&self.board)
    }

    /// Decided winner, or the side to move is blocked.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.legal_moves().is_empty()
    }
}

/// Free-function surface over [`GameState`].
#[inline]
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    state.legal_moves()
}

#[inline]
pub fn apply_move(state: &GameState, mv: Move) -> GameState {
    state.apply(mv)
}

#[inline]
pub fn winner(state: &GameState) -> Option<Player> {
    state.winner()
}

#[inline]
pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}
