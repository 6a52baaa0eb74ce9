//! Falling sand simulation core.
//!
//! A fixed-size [`Grid`] is advanced one pass per tick by the per-material
//! rules in [`elements`] and mutated between passes by the circular
//! [`brush::Brush`]. [`Simulation`] drives both from a single `tick` call;
//! [`universe::Universe`] exposes that to the browser.

pub mod api;
pub mod brush;
pub mod cell;
pub mod config;
pub mod elements;
pub mod palette;
pub mod random;
pub mod simulation;
pub mod universe;

pub use config::{ConfigError, SimConfig};
pub use simulation::{GridView, Simulation, TickReport};

use api::{CellApi, Move};
use cell::{Cell, Material, RESET_JITTER_SPAN};
use random::RandomSource;

/// What a single pass did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PassSummary {
    pub generation: u32,
    pub left_to_right: bool,
    /// Occupied cells whose rule was invoked.
    pub visited: usize,
    pub moved: usize,
}

/// 2D grid of cells. Out-of-bounds queries answer "no", writes are no-ops.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    generation: u32,
}

impl Grid {
    /// All-empty grid with zero jitter. Dimensions are expected to have
    /// passed [`SimConfig::validate`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::empty(); width * height],
            generation: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Generation of the most recent pass.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Row-major cell storage.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    #[must_use]
    pub fn material(&self, x: i32, y: i32) -> Option<Material> {
        self.get(x, y).map(|c| c.material)
    }

    #[must_use]
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.material(x, y) == Some(Material::Empty)
    }

    #[must_use]
    pub fn is_water(&self, x: i32, y: i32) -> bool {
        self.material(x, y) == Some(Material::Water)
    }

    #[must_use]
    pub fn count(&self, material: Material) -> usize {
        self.cells.iter().filter(|c| c.material == material).count()
    }

    /// Raw write used to build scenes. The static flag is dropped for
    /// anything but stone.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        self.cells[i] = Cell {
            is_static: cell.is_static && cell.material == Material::Stone,
            ..cell
        };
        true
    }

    /// Relocate the particle at `from` into the empty cell at `to`.
    pub fn move_cell(&mut self, from: (i32, i32), to: (i32, i32)) -> bool {
        let (Some(src), Some(dst)) = (self.index(from.0, from.1), self.index(to.0, to.1)) else {
            return false;
        };
        if src == dst || !self.cells[dst].is_empty() {
            return false;
        }
        self.cells[dst] = Cell {
            clock: self.generation,
            ..self.cells[src]
        };
        let vacated = &mut self.cells[src];
        vacated.material = Material::Empty;
        vacated.is_static = false;
        true
    }

    /// Exchange two particles. Both are stamped as moved this pass.
    pub fn swap_cells(&mut self, a: (i32, i32), b: (i32, i32)) -> bool {
        let (Some(i), Some(j)) = (self.index(a.0, a.1), self.index(b.0, b.1)) else {
            return false;
        };
        if i == j {
            return false;
        }
        self.cells.swap(i, j);
        self.cells[i].clock = self.generation;
        self.cells[j].clock = self.generation;
        true
    }

    /// Mark a stone as settled. Anything else is left alone.
    pub fn settle(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) if self.cells[i].material == Material::Stone => {
                self.cells[i].is_static = true;
                true
            }
            _ => false,
        }
    }

    /// Put a fresh particle into an empty cell. Occupied cells are never overwritten.
    pub fn place(&mut self, x: i32, y: i32, material: Material, jitter: f32) -> bool {
        match self.index(x, y) {
            Some(i) if self.cells[i].is_empty() && material != Material::Empty => {
                self.cells[i] = Cell {
                    clock: self.generation,
                    ..Cell::with_jitter(material, jitter)
                };
                true
            }
            _ => false,
        }
    }

    /// Clear a cell. Returns whether anything was removed.
    pub fn erase(&mut self, x: i32, y: i32) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        let cell = &mut self.cells[i];
        let removed = !cell.is_empty();
        cell.material = Material::Empty;
        cell.is_static = false;
        removed
    }

    /// Empty every cell and roll fresh jitter.
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = Cell::with_jitter(Material::Empty, rng.jitter(RESET_JITTER_SPAN));
        }
    }

    /// Open a new pass and return its generation.
    pub(crate) fn begin_pass(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Advance the simulation by one pass.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> PassSummary {
        self.step_observed(rng, |_| {})
    }

    /// Advance by one pass, reporting every move to `observe`.
    ///
    /// Scans rows bottom-to-top, skipping the last row since nothing can fall
    /// out of it. The horizontal sweep direction is drawn once per pass.
    /// Empty cells and particles already moved this pass (clock == generation)
    /// are skipped.
    pub fn step_observed<R, F>(&mut self, rng: &mut R, mut observe: F) -> PassSummary
    where
        R: RandomSource + ?Sized,
        F: FnMut(Move),
    {
        let gen = self.begin_pass();
        let left_to_right = rng.coin();
        let w = self.width as i32;
        let h = self.height as i32;
        let mut summary = PassSummary {
            generation: gen,
            left_to_right,
            ..PassSummary::default()
        };

        for y in (0..h - 1).rev() {
            for step in 0..w {
                let x = if left_to_right { step } else { w - 1 - step };
                let cell = self.cells[y as usize * self.width + x as usize];
                if cell.is_empty() || cell.clock == gen {
                    continue;
                }
                summary.visited += 1;
                let mut api = CellApi::new(self, x, y);
                if let Some(mv) = elements::update_cell(cell.material, &mut api, rng) {
                    summary.moved += 1;
                    observe(mv);
                }
            }
        }
        summary
    }
}
