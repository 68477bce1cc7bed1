use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::{manhattan, Dir};

/// An 8-puzzle board. Cells 0..=8 laid out row-major (r*3 + c); tile 0 is the blank.
///
/// Equality and hashing are by contents only, which is what the search uses to
/// identify states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tiles([u8; 9]);

impl Tiles {
    /// Wrap raw cells without validation. Callers must supply a permutation of 0..=8.
    #[inline]
    pub const fn new(cells: [u8; 9]) -> Self {
        Self(cells)
    }

    #[inline]
    pub fn from_rows(rows: [[u8; 3]; 3]) -> Self {
        let mut cells = [0u8; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self(cells)
    }

    /// The standard goal: 1..8 in order with the blank bottom-right.
    #[inline]
    pub const fn goal() -> Self {
        Self([1, 2, 3, 4, 5, 6, 7, 8, 0])
    }

    #[inline]
    pub fn cells(&self) -> &[u8; 9] {
        &self.0
    }

    #[inline]
    pub fn rows(&self) -> [[u8; 3]; 3] {
        let c = &self.0;
        [[c[0], c[1], c[2]], [c[3], c[4], c[5]], [c[6], c[7], c[8]]]
    }

    /// Cell index holding `tile`.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn position_of(&self, tile: u8) -> u8 {
        // A valid board always contains every tile.
        self.0.iter().position(|&t| t == tile).unwrap_or(0) as u8
    }

    #[inline]
    pub fn blank(&self) -> u8 {
        self.position_of(0)
    }

    /// Slide the blank one cell in `dir`, or None when that would leave the board.
    #[inline]
    pub fn slide(&self, dir: Dir) -> Option<Tiles> {
        let from = self.blank();
        let to = dir.step(from)?;
        let mut next = self.0;
        next.swap(from as usize, to as usize);
        Some(Tiles(next))
    }

    /// Successor boards in Up, Down, Left, Right order.
    pub fn successors(&self) -> impl Iterator<Item = (Dir, Tiles)> + '_ {
        Dir::all()
            .into_iter()
            .filter_map(move |d| self.slide(d).map(|t| (d, t)))
    }

    /// Sum of Manhattan distances of the non-blank tiles to their cells in `goal`.
    #[inline]
    pub fn manhattan_to(&self, goal: &Tiles) -> u32 {
        GoalIndex::new(goal).manhattan(self)
    }

    /// Number of inversions among the non-blank tiles in row-major order.
    pub fn inversions(&self) -> u32 {
        let tiles: Vec<u8> = self.0.iter().copied().filter(|&t| t != 0).collect();
        let mut count = 0u32;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// On a 3-wide board a goal is reachable iff both boards share inversion parity.
    #[inline]
    pub fn is_solvable_from(&self, goal: &Tiles) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }
}

impl Default for Tiles {
    fn default() -> Self {
        Self::goal()
    }
}

impl FromStr for Tiles {
    type Err = Error;

    /// Accepts nine digits 0-8 (`_` or `.` for the blank). Whitespace, `,`, `/`, `|`
    /// and brackets are ignored so "724/506/831" and "[[7,2,4],[5,0,6],[8,3,1]]" both work.
    #[allow(clippy::cast_possible_truncation)]
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(9);
        for (position, ch) in s.chars().enumerate() {
            match ch {
                c if c.is_whitespace() => {}
                ',' | '/' | '|' | '[' | ']' => {}
                '_' | '.' => cells.push(0u8),
                '0'..='8' => cells.push(ch as u8 - b'0'),
                character => {
                    return Err(Error::InvalidCellCharacter {
                        character,
                        position,
                        context: s.to_string(),
                    })
                }
            }
        }
        if cells.len() != 9 {
            return Err(Error::InvalidBoardLength {
                got: cells.len(),
                context: s.to_string(),
            });
        }
        let mut seen = [false; 9];
        for &t in &cells {
            if std::mem::replace(&mut seen[t as usize], true) {
                return Err(Error::DuplicateTile {
                    tile: t,
                    context: s.to_string(),
                });
            }
        }
        let mut arr = [0u8; 9];
        arr.copy_from_slice(&cells);
        Ok(Tiles(arr))
    }
}

impl fmt::Display for Tiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.rows().iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                .collect();
            write!(f, "{}", cells.join(" "))?;
            if r < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Goal cell of every tile, precomputed once per search.
#[derive(Debug, Clone, Copy)]
pub struct GoalIndex {
    board: Tiles,
    positions: [u8; 9],
}

impl GoalIndex {
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(goal: &Tiles) -> Self {
        let mut positions = [0u8; 9];
        for (cell, &tile) in goal.cells().iter().enumerate() {
            positions[tile as usize] = cell as u8;
        }
        Self {
            board: *goal,
            positions,
        }
    }

    #[inline]
    pub fn is_goal(&self, tiles: &Tiles) -> bool {
        *tiles == self.board
    }

    /// h(n): admissible and consistent for unit-cost slides.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn manhattan(&self, tiles: &Tiles) -> u32 {
        tiles
            .cells()
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(cell, &t)| manhattan(cell as u8, self.positions[t as usize]))
            .sum()
    }
}
