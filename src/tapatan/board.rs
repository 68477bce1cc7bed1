use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // Cells 0..=8 laid out row-major (r*3 + c)
    cells: [Option<Player>; 9],
}

impl Board {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting layout: `X O X / . . . / O X O`.
    #[inline]
    pub fn initial() -> Self {
        use Player::{O, X};
        Self::from_cells([Some(X), Some(O), Some(X), None, None, None, Some(O), Some(X), Some(O)])
    }

    #[inline]
    pub fn from_cells(cells: [Option<Player>; 9]) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Player>; 9] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, idx: u8) -> Option<Player> {
        self.cells[idx as usize]
    }

    #[inline]
    pub fn set(&mut self, idx: u8, cell: Option<Player>) {
        self.cells[idx as usize] = cell;
    }

    #[inline]
    pub fn is_empty(&self, idx: u8) -> bool {
        self.cells[idx as usize].is_none()
    }

    #[inline]
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| **c == Some(player)).count()
    }

    /// Cells holding `player`'s pieces, ascending (row-major scan).
    #[inline]
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = u8> + '_ {
        (0u8..9).filter(move |&i| self.get(i) == Some(player))
    }

    /// Move whatever sits on `from` to `to`, leaving `from` empty.
    #[inline]
    pub fn relocate(&mut self, from: u8, to: u8) {
        let piece = self.cells[from as usize].take();
        self.cells[to as usize] = piece;
    }

    /// Render with row/column coordinates, as shown to players.
    pub fn render(&self) -> String {
        let mut out = String::from("     0     1     2\n  ┌─────┬─────┬─────┐\n");
        for r in 0u8..3 {
            out.push_str(&format!("{r} │"));
            for c in 0u8..3 {
                let sym = self.get(r * 3 + c).map_or(' ', Player::symbol);
                out.push_str(&format!("  {sym}  │"));
            }
            out.push('\n');
            out.push_str(if r < 2 {
                "  ├─────┼─────┼─────┤\n"
            } else {
                "  └─────┴─────┴─────┘\n"
            });
        }
        out
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Nine cells of `X`, `O`, or one of ` `, `.`, `_`, `-` for empty.
    /// Row separators `/`, `|` and line breaks are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = Vec::with_capacity(9);
        for (position, ch) in s.chars().enumerate() {
            match ch {
                '/' | '|' | '\n' | '\r' => {}
                ' ' | '.' | '_' | '-' => cells.push(None),
                c => match Player::from_symbol(c) {
                    Some(p) => cells.push(Some(p)),
                    None => {
                        return Err(Error::InvalidCellCharacter {
                            character: c,
                            position,
                            context: s.to_string(),
                        })
                    }
                },
            }
        }
        if cells.len() != 9 {
            return Err(Error::InvalidBoardLength {
                got: cells.len(),
                context: s.to_string(),
            });
        }
        let mut arr = [None; 9];
        arr.copy_from_slice(&cells);
        Ok(Self::from_cells(arr))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", cell.map_or('.', Player::symbol))?;
        }
        Ok(())
    }
}
