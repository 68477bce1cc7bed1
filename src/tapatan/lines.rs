use crate::tapatan::board::Board;
use crate::types::Player;

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[u8; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Owner of a completed line, checked rows first, then columns, then diagonals.
pub fn line_winner(board: &Board) -> Option<Player> {
    WINNING_LINES.iter().find_map(|line| {
        let first = board.get(line[0])?;
        line[1..]
            .iter()
            .all(|&i| board.get(i) == Some(first))
            .then_some(first)
    })
}

/// Lines holding exactly two of `player`'s pieces with the third cell empty.
pub fn open_twos(board: &Board, player: Player) -> usize {
    WINNING_LINES
        .iter()
        .filter(|line| {
            let mine = line.iter().filter(|&&i| board.get(i) == Some(player)).count();
            let empty = line.iter().filter(|&&i| board.is_empty(i)).count();
            mine == 2 && empty == 1
        })
        .count()
}
