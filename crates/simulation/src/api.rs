//! Relative-offset API for material update functions.
//!
//! A rule only ever sees its own cell and may mutate only within reach:
//! the same row (lateral) and the row directly below, one column either
//! side. Out-of-bounds and out-of-reach requests answer "no".

use crate::cell::{Cell, Material};
use crate::Grid;

/// A successful relocation performed by a rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Move {
    /// The particle moved into an empty cell, leaving `from` empty.
    Shift { from: (i32, i32), to: (i32, i32) },
    /// The particle traded places with the water that occupied `to`.
    Swap { from: (i32, i32), to: (i32, i32) },
}

impl Move {
    #[must_use]
    pub fn from(&self) -> (i32, i32) {
        match *self {
            Self::Shift { from, .. } | Self::Swap { from, .. } => from,
        }
    }

    #[must_use]
    pub fn to(&self) -> (i32, i32) {
        match *self {
            Self::Shift { to, .. } | Self::Swap { to, .. } => to,
        }
    }
}

#[derive(Debug)]
pub struct CellApi<'a> {
    grid: &'a mut Grid,
    x: i32,
    y: i32,
}

fn within_reach(dx: i32, dy: i32) -> bool {
    (-1..=1).contains(&dx) && (0..=1).contains(&dy) && (dx, dy) != (0, 0)
}

impl<'a> CellApi<'a> {
    pub fn new(grid: &'a mut Grid, x: i32, y: i32) -> Self {
        Self { grid, x, y }
    }

    #[must_use]
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn cell(&self) -> Cell {
        self.grid.get(self.x, self.y).unwrap_or_default()
    }

    #[must_use]
    pub fn in_bounds(&self, dx: i32, dy: i32) -> bool {
        self.grid.in_bounds(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn is_empty(&self, dx: i32, dy: i32) -> bool {
        self.grid.is_empty(self.x + dx, self.y + dy)
    }

    #[must_use]
    pub fn is_water(&self, dx: i32, dy: i32) -> bool {
        self.grid.is_water(self.x + dx, self.y + dy)
    }

    /// Water that has not yet moved during the current pass.
    #[must_use]
    pub fn can_displace(&self, dx: i32, dy: i32) -> bool {
        let generation = self.grid.generation();
        within_reach(dx, dy)
            && self
                .grid
                .get(self.x + dx, self.y + dy)
                .is_some_and(|c| c.material == Material::Water && c.clock != generation)
    }

    /// Move into the empty cell at the offset.
    pub fn move_to(&mut self, dx: i32, dy: i32) -> Option<Move> {
        if !within_reach(dx, dy) {
            return None;
        }
        let from = (self.x, self.y);
        let to = (self.x + dx, self.y + dy);
        self.grid.move_cell(from, to).then(|| {
            self.x = to.0;
            self.y = to.1;
            Move::Shift { from, to }
        })
    }

    /// Sink through the water at the offset by exchanging places with it.
    pub fn swap_with(&mut self, dx: i32, dy: i32) -> Option<Move> {
        if !self.can_displace(dx, dy) {
            return None;
        }
        let from = (self.x, self.y);
        let to = (self.x + dx, self.y + dy);
        self.grid.swap_cells(from, to).then(|| {
            self.x = to.0;
            self.y = to.1;
            Move::Swap { from, to }
        })
    }

    /// Mark this stone as permanently at rest.
    pub fn settle(&mut self) {
        self.grid.settle(self.x, self.y);
    }
}
