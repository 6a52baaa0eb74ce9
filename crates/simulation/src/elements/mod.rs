//! Per-material update functions dispatched from the pass loop.

mod sand;
mod stone;
mod water;

use crate::api::{CellApi, Move};
use crate::cell::Material;
use crate::random::RandomSource;

pub use sand::update_sand;
pub use stone::update_stone;
pub use water::update_water;

/// Dispatch to the update function for `material`.
///
/// Empty cells are skipped by the scheduler and are a no-op here.
pub fn update_cell<R: RandomSource + ?Sized>(
    material: Material,
    api: &mut CellApi,
    rng: &mut R,
) -> Option<Move> {
    match material {
        Material::Sand => update_sand(api, rng),
        Material::Water => update_water(api, rng),
        Material::Stone => update_stone(api),
        Material::Empty => None,
    }
}
