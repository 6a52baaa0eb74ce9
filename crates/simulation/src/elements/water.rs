//! Water element: falls, slides diagonally, spreads sideways.
//!
//! Diagonal and lateral sides are each drawn fresh per invocation. Water
//! never swaps with other water and there is no pressure model: a lone
//! particle simply drifts into whichever neighbouring cell is open, which
//! is enough to flatten puddles over a few frames.

use crate::api::{CellApi, Move};
use crate::random::RandomSource;

pub fn update_water<R: RandomSource + ?Sized>(api: &mut CellApi, rng: &mut R) -> Option<Move> {
    // Phase 1: Gravity.
    if let Some(mv) = api.move_to(0, 1) {
        return Some(mv);
    }

    // Phase 2: Diagonal fall.
    let dir = rng.direction();
    for dx in [dir, -dir] {
        if let Some(mv) = api.move_to(dx, 1) {
            return Some(mv);
        }
    }

    // Phase 3: Lateral spread, drawn side preferred when both are open.
    let spread = rng.direction();
    if api.is_empty(spread, 0) {
        api.move_to(spread, 0)
    } else if api.is_empty(-spread, 0) {
        api.move_to(-spread, 0)
    } else {
        None
    }
}
