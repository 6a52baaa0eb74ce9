//! Stone element: drops straight down until it lands, then never moves again.

use crate::api::{CellApi, Move};

pub fn update_stone(api: &mut CellApi) -> Option<Move> {
    if api.cell().is_static {
        return None;
    }
    if let Some(mv) = api.move_to(0, 1).or_else(|| api.swap_with(0, 1)) {
        return Some(mv);
    }
    // Wait above water that moved this pass
    if !api.is_water(0, 1) {
        api.settle();
    }
    None
}
