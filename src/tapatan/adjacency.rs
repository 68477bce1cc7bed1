use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Which lines of the physical board pieces may slide along.
///
/// Both variants keep all eight winning lines; they differ only in movement.
/// `Orthogonal` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjacency {
    /// Horizontal and vertical lines only.
    #[default]
    Orthogonal,
    /// Adds the two diagonals through the centre.
    Diagonal,
}

// Neighbour lists in the order moves are generated.
const ORTHOGONAL: [&[u8]; 9] = [
    &[1, 3],
    &[0, 2, 4],
    &[1, 5],
    &[0, 4, 6],
    &[1, 3, 5, 7],
    &[2, 4, 8],
    &[3, 7],
    &[6, 4, 8],
    &[7, 5],
];

const DIAGONAL: [&[u8]; 9] = [
    &[1, 3, 4],
    &[0, 2, 4],
    &[1, 4, 5],
    &[0, 4, 6],
    &[0, 1, 2, 3, 5, 6, 7, 8],
    &[2, 4, 8],
    &[3, 4, 7],
    &[6, 4, 8],
    &[7, 4, 5],
];

impl Adjacency {
    #[inline]
    pub fn neighbors(self, idx: u8) -> &'static [u8] {
        match self {
            Adjacency::Orthogonal => ORTHOGONAL[idx as usize],
            Adjacency::Diagonal => DIAGONAL[idx as usize],
        }
    }

    #[inline]
    pub fn connects(self, from: u8, to: u8) -> bool {
        self.neighbors(from).contains(&to)
    }

    pub fn name(self) -> &'static str {
        match self {
            Adjacency::Orthogonal => "orthogonal",
            Adjacency::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for Adjacency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Adjacency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orthogonal" | "ortho" | "plain" => Ok(Adjacency::Orthogonal),
            "diagonal" | "diagonals" | "full" => Ok(Adjacency::Diagonal),
            _ => Err(Error::UnknownName {
                kind: "adjacency",
                input: s.to_string(),
                expected: "orthogonal, diagonal",
            }),
        }
    }
}
