//! Sand element: falls down, then diagonally; sinks through Water by swapping.

use crate::api::{CellApi, Move};
use crate::random::RandomSource;

pub fn update_sand<R: RandomSource + ?Sized>(api: &mut CellApi, rng: &mut R) -> Option<Move> {
    if !api.in_bounds(0, 1) {
        return None;
    }

    // Fall straight down, or sink through water (sand is denser)
    if let Some(mv) = api.move_to(0, 1).or_else(|| api.swap_with(0, 1)) {
        return Some(mv);
    }
    // Wait above water that moved this pass
    if api.is_water(0, 1) {
        return None;
    }

    // Try diagonals, fresh random side first
    let dir = rng.direction();
    for dx in [dir, -dir] {
        if let Some(mv) = api.move_to(dx, 1).or_else(|| api.swap_with(dx, 1)) {
            return Some(mv);
        }
    }
    None
}
