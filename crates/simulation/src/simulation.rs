//! Frame-level driver: one `tick` paints, then runs a single pass.
//!
//! The simulation owns its grid for the whole tick. Renderers only get a
//! [`GridView`] between ticks, so they never observe a half-finished pass.
//! Reset and reconfiguration go through `&mut self` and therefore can only
//! land between ticks.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::brush::{Brush, PaintSummary, Tool};
use crate::cell::Material;
use crate::config::{ConfigError, SimConfig};
use crate::random::RandomSource;
use crate::{Grid, PassSummary};

/// What one call to [`Simulation::tick`] did. Both halves are `None` while paused.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TickReport {
    pub painted: Option<PaintSummary>,
    pub pass: Option<PassSummary>,
}

#[derive(Debug)]
pub struct Simulation<R = SmallRng> {
    config: SimConfig,
    grid: Grid,
    brush: Brush,
    rng: R,
    paused: bool,
    ticks: u64,
}

impl Simulation<SmallRng> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate.
    pub fn with_rng(config: SimConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate().inspect_err(|err| {
            log::warn!("rejected simulation config: {err}");
        })?;
        let mut sim = Self {
            config,
            grid: Grid::new(config.width, config.height),
            brush: Brush::default(),
            rng,
            paused: false,
            ticks: 0,
        };
        sim.reset();
        log::debug!(
            "simulation created: {}x{}, paint probability {}",
            config.width,
            config.height,
            config.paint_probability
        );
        Ok(sim)
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scene setup outside the tick loop.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn brush(&self) -> Brush {
        self.brush
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Replace the grid with an empty one of the new size.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] and leaves the current grid untouched if the
    /// dimensions are invalid.
    pub fn configure(&mut self, width: usize, height: usize) -> Result<(), ConfigError> {
        let config = SimConfig {
            width,
            height,
            ..self.config
        };
        config.validate().inspect_err(|err| {
            log::warn!("rejected grid size {width}x{height}: {err}");
        })?;
        self.config = config;
        self.grid = Grid::new(width, height);
        self.reset();
        log::debug!("grid reconfigured to {width}x{height}");
        Ok(())
    }

    /// Empty the grid and roll fresh jitter.
    pub fn reset(&mut self) {
        self.grid.reset(&mut self.rng);
        log::debug!("grid reset");
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::BrushRadius`] if `radius` is zero.
    pub fn set_brush(&mut self, tool: Tool, radius: u32) -> Result<(), ConfigError> {
        self.brush = Brush::new(tool, radius).inspect_err(|err| {
            log::warn!("rejected brush: {err}");
        })?;
        log::debug!("brush set to {tool:?}, radius {radius}");
        Ok(())
    }

    /// Advance by exactly one frame: brush first (while the pointer is held
    /// over a cell), then one full pass.
    pub fn tick(&mut self, pointer_down: bool, pointer_cell: Option<(i32, i32)>) -> TickReport {
        if self.paused {
            return TickReport::default();
        }

        let painted = match pointer_cell {
            Some(center) if pointer_down => Some(self.brush.apply(
                &mut self.grid,
                center,
                self.config.paint_probability,
                &mut self.rng,
            )),
            _ => None,
        };
        let pass = self.grid.step(&mut self.rng);
        self.ticks += 1;

        log::trace!(
            "tick {}: painted {:?}, visited {}, moved {}",
            self.ticks,
            painted.map(|p| p.changed),
            pass.visited,
            pass.moved
        );
        TickReport {
            painted,
            pass: Some(pass),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GridView<'_> {
        GridView { grid: &self.grid }
    }
}

/// Read-only view of the grid for renderers.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    grid: &'a Grid,
}

impl GridView<'_> {
    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn material(&self, x: i32, y: i32) -> Option<Material> {
        self.grid.material(x, y)
    }

    #[must_use]
    pub fn jitter(&self, x: i32, y: i32) -> Option<f32> {
        self.grid.get(x, y).map(|c| c.jitter)
    }

    #[must_use]
    pub fn count(&self, material: Material) -> usize {
        self.grid.count(material)
    }

    /// Row-major `(material, jitter)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Material, f32)> + '_ {
        self.grid.cells().iter().map(|c| (c.material, c.jitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use rand::rngs::mock::StepRng;

    fn sim(width: usize, height: usize) -> Simulation {
        Simulation::new(SimConfig::new(width, height).unwrap(), 17).unwrap()
    }

    #[test]
    fn new_starts_empty_with_default_brush() {
        let sim = sim(160, 120);
        let view = sim.snapshot();
        assert_eq!((view.width(), view.height()), (160, 120));
        assert_eq!(view.count(Material::Empty), 160 * 120);
        assert_eq!(sim.brush().tool(), Tool::Paint(Material::Sand));
        assert_eq!(sim.brush().radius(), 4);
        assert!(view.iter().all(|(_, j)| (-10.0..10.0).contains(&j)));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig {
            width: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Simulation::new(config, 1),
            Err(ConfigError::EmptyGrid { .. })
        ));
    }

    #[test]
    fn configure_replaces_grid_or_keeps_it() {
        let mut sim = sim(10, 10);
        sim.grid_mut().set(1, 1, Cell::new(Material::Sand));

        assert!(sim.configure(0, 5).is_err());
        assert_eq!(sim.grid().width(), 10);
        assert_eq!(sim.grid().material(1, 1), Some(Material::Sand));

        sim.configure(20, 8).unwrap();
        assert_eq!((sim.grid().width(), sim.grid().height()), (20, 8));
        assert_eq!(sim.snapshot().count(Material::Empty), 160);
    }

    #[test]
    fn set_brush_validates_radius() {
        let mut sim = sim(10, 10);
        assert_eq!(
            sim.set_brush(Tool::Erase, 0),
            Err(ConfigError::BrushRadius(0))
        );
        assert_eq!(sim.brush().tool(), Tool::Paint(Material::Sand));
        sim.set_brush(Tool::Erase, 2).unwrap();
        assert_eq!(sim.brush().tool(), Tool::Erase);
    }

    #[test]
    fn lone_sand_reaches_the_floor_in_nine_ticks() {
        let mut sim = sim(10, 10);
        sim.grid_mut().set(5, 0, Cell::new(Material::Sand));
        for _ in 0..9 {
            sim.tick(false, None);
        }
        assert_eq!(sim.snapshot().material(5, 9), Some(Material::Sand));
        assert_eq!(sim.ticks(), 9);
    }

    #[test]
    fn pointer_up_does_not_paint() {
        let mut sim = sim(10, 10);
        let report = sim.tick(false, Some((5, 5)));
        assert_eq!(report.painted, None);
        assert_eq!(sim.snapshot().count(Material::Sand), 0);

        let report = sim.tick(true, None);
        assert_eq!(report.painted, None);
    }

    #[test]
    fn paint_then_step_in_same_tick() {
        let config = SimConfig::new(10, 10).unwrap();
        let mut sim = Simulation::with_rng(config, StepRng::new(0, 0)).unwrap();
        sim.set_brush(Tool::Paint(Material::Stone), 1).unwrap();

        let report = sim.tick(true, Some((5, 0)));
        assert_eq!(report.painted.map(|p| p.changed), Some(4));
        // Everything painted on row 0 has already dropped one row.
        assert_eq!(sim.snapshot().count(Material::Stone), 4);
        assert_eq!(sim.snapshot().material(5, 0), Some(Material::Empty));
        assert_eq!(sim.snapshot().material(5, 1), Some(Material::Stone));
    }

    #[test]
    fn paused_tick_does_nothing() {
        let mut sim = sim(10, 10);
        sim.grid_mut().set(5, 0, Cell::new(Material::Sand));
        sim.set_paused(true);
        let report = sim.tick(true, Some((2, 2)));
        assert_eq!(report, TickReport::default());
        assert_eq!(sim.snapshot().material(5, 0), Some(Material::Sand));
        assert_eq!(sim.snapshot().count(Material::Sand), 1);

        sim.set_paused(false);
        sim.tick(false, None);
        assert_eq!(sim.snapshot().material(5, 1), Some(Material::Sand));
    }

    #[test]
    fn reset_clears_everything() {
        let mut sim = sim(10, 10);
        for _ in 0..5 {
            sim.tick(true, Some((5, 5)));
        }
        assert!(sim.snapshot().count(Material::Sand) > 0);
        sim.reset();
        assert_eq!(sim.snapshot().count(Material::Empty), 100);
    }

    #[test]
    fn conservation_outside_the_brush() {
        let mut sim = sim(24, 24);
        for _ in 0..20 {
            sim.tick(true, Some((12, 4)));
        }
        sim.set_brush(Tool::Paint(Material::Water), 3).unwrap();
        for _ in 0..20 {
            sim.tick(true, Some((6, 2)));
        }
        let counts = |sim: &Simulation| {
            let view = sim.snapshot();
            (view.count(Material::Sand), view.count(Material::Water))
        };
        let before = counts(&sim);
        for _ in 0..200 {
            sim.tick(false, None);
            assert_eq!(counts(&sim), before);
        }
    }
}
