use std::fmt;

use serde::Serialize;

/// A Tapatan mark. `X` moves first and is the maximizing side for utilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    #[inline]
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'X' | 'x' => Some(Player::X),
            'O' | 'o' => Some(Player::O),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Direction the blank travels in the 8-puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Successor generation order.
    #[inline]
    pub fn all() -> [Dir; 4] {
        [Dir::Up, Dir::Down, Dir::Left, Dir::Right]
    }

    #[inline]
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Cell reached by stepping from `idx` in this direction, or None at the edge.
    #[inline]
    pub fn step(self, idx: u8) -> Option<u8> {
        let (r, c) = idx_to_rc(idx);
        match self {
            Dir::Up if r > 0 => rc_to_idx(r - 1, c),
            Dir::Down => rc_to_idx(r + 1, c),
            Dir::Left if c > 0 => rc_to_idx(r, c - 1),
            Dir::Right => rc_to_idx(r, c + 1),
            _ => None,
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Dir::Up => "Up",
            Dir::Down => "Down",
            Dir::Left => "Left",
            Dir::Right => "Right",
        };
        f.write_str(s)
    }
}

/// Board indexing helpers (3x3 board)
#[inline]
pub fn idx_to_rc(idx: u8) -> (u8, u8) {
    debug_assert!(idx < 9);
    (idx / 3, idx % 3)
}

#[inline]
pub fn rc_to_idx(r: u8, c: u8) -> Option<u8> {
    if r < 3 && c < 3 {
        Some(r * 3 + c)
    } else {
        None
    }
}

/// Manhattan distance between two cells.
#[inline]
pub fn manhattan(a: u8, b: u8) -> u32 {
    let (ra, ca) = idx_to_rc(a);
    let (rb, cb) = idx_to_rc(b);
    u32::from(ra.abs_diff(rb)) + u32::from(ca.abs_diff(cb))
}
