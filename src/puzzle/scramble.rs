use rand::seq::SliceRandom;
use rand::Rng;

use crate::puzzle::tiles::Tiles;
use crate::rng::rng_for_instance;
use crate::types::Dir;

/// Random walk of the blank starting from `from`, never undoing the previous slide.
///
/// The result is always reachable from `from`, and at most `moves` slides away.
pub fn scramble_with<R: Rng + ?Sized>(from: &Tiles, moves: usize, rng: &mut R) -> Tiles {
    let mut board = *from;
    let mut last: Option<Dir> = None;
    for _ in 0..moves {
        let options: Vec<(Dir, Tiles)> = board
            .successors()
            .filter(|(d, _)| Some(d.opposite()) != last)
            .collect();
        // Every cell has at least two neighbours, so one survives the filter.
        let Some(&(dir, next)) = options.choose(rng) else { break };
        board = next;
        last = Some(dir);
    }
    board
}

/// Reproducible scramble of `from` for a (seed, instance) pair.
#[inline]
pub fn scramble(from: &Tiles, moves: usize, seed: u64, instance: u64) -> Tiles {
    let mut rng = rng_for_instance(seed, instance);
    scramble_with(from, moves, &mut rng)
}
