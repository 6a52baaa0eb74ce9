//! Circular brush that paints or erases material around the pointer.
//!
//! Each candidate cell inside the circle is kept with a fixed probability,
//! so the stamp has a ragged edge instead of a perfect disc. Painting only
//! fills empty cells; erasing clears whatever is there.

use crate::cell::{Material, PAINT_JITTER_SPAN};
use crate::config::{ConfigError, DEFAULT_BRUSH_RADIUS};
use crate::random::RandomSource;
use crate::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Tool {
    Paint(Material),
    Erase,
}

impl Tool {
    /// Selecting the empty material means erasing.
    #[must_use]
    pub fn from_material(material: Material) -> Self {
        match material {
            Material::Empty => Self::Erase,
            other => Self::Paint(other),
        }
    }
}

/// Cells the brush considered, kept and actually changed on one application.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PaintSummary {
    pub candidates: usize,
    pub accepted: usize,
    pub changed: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Brush {
    tool: Tool,
    radius: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            tool: Tool::Paint(Material::Sand),
            radius: DEFAULT_BRUSH_RADIUS,
        }
    }
}

impl Brush {
    /// # Errors
    ///
    /// Returns [`ConfigError::BrushRadius`] if `radius` is zero.
    pub fn new(tool: Tool, radius: u32) -> Result<Self, ConfigError> {
        if radius == 0 {
            return Err(ConfigError::BrushRadius(0));
        }
        Ok(Self { tool, radius })
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// In-bounds cells within Euclidean distance `radius` of `center`.
    pub fn stencil<'g>(
        &self,
        grid: &'g Grid,
        center: (i32, i32),
    ) -> impl Iterator<Item = (i32, i32)> + 'g {
        let r = i64::from(self.radius);
        let (cx, cy) = (i64::from(center.0), i64::from(center.1));
        let x_min = (cx - r).max(0);
        let x_max = (cx + r).min(grid.width() as i64 - 1);
        let y_min = (cy - r).max(0);
        let y_max = (cy + r).min(grid.height() as i64 - 1);

        (y_min..=y_max)
            .flat_map(move |y| (x_min..=x_max).map(move |x| (x, y)))
            .filter(move |&(x, y)| {
                // Squares of i32-range offsets and a u32 radius fit in i128.
                let (dx, dy) = (i128::from(x - cx), i128::from(y - cy));
                dx * dx + dy * dy <= i128::from(r) * i128::from(r)
            })
            .map(|(x, y)| (x as i32, y as i32))
    }

    /// Apply one stamp centred on `center`.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid,
        center: (i32, i32),
        keep_probability: f64,
        rng: &mut R,
    ) -> PaintSummary {
        let cells: Vec<(i32, i32)> = self.stencil(grid, center).collect();
        let mut summary = PaintSummary {
            candidates: cells.len(),
            ..PaintSummary::default()
        };

        for (x, y) in cells {
            if !rng.chance(keep_probability) {
                continue;
            }
            summary.accepted += 1;
            let changed = match self.tool {
                Tool::Erase => grid.erase(x, y),
                Tool::Paint(material) => {
                    grid.is_empty(x, y) && grid.place(x, y, material, rng.jitter(PAINT_JITTER_SPAN))
                }
            };
            if changed {
                summary.changed += 1;
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn zero_radius_rejected() {
        assert_eq!(
            Brush::new(Tool::Erase, 0),
            Err(ConfigError::BrushRadius(0))
        );
        assert!(Brush::new(Tool::Erase, 1).is_ok());
    }

    #[test]
    fn empty_selection_is_the_eraser() {
        assert_eq!(Tool::from_material(Material::Empty), Tool::Erase);
        assert_eq!(
            Tool::from_material(Material::Water),
            Tool::Paint(Material::Water)
        );
    }

    #[test]
    fn stencil_is_a_disc() {
        let grid = Grid::new(11, 11);
        let brush = Brush::new(Tool::Paint(Material::Stone), 3).unwrap();
        let cells: Vec<_> = brush.stencil(&grid, (5, 5)).collect();
        assert_eq!(cells.len(), 29);
        assert!(cells.iter().all(|&(x, y)| (x - 5).pow(2) + (y - 5).pow(2) <= 9));
        assert!(cells.contains(&(5, 2)));
        assert!(!cells.contains(&(2, 2)));
    }

    #[test]
    fn stencil_is_clipped_at_edges() {
        let grid = Grid::new(10, 10);
        let brush = Brush::new(Tool::Erase, 1).unwrap();
        let cells: Vec<_> = brush.stencil(&grid, (0, 0)).collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (0, 1)]);

        // Center far outside the grid touches nothing.
        assert_eq!(brush.stencil(&grid, (-50, 4)).count(), 0);
    }

    #[test]
    fn huge_radius_covers_the_whole_grid() {
        let mut grid = Grid::new(8, 8);
        let brush = Brush::new(Tool::Paint(Material::Sand), u32::MAX).unwrap();
        let summary = brush.apply(&mut grid, (4, 4), 1.0, &mut always());
        assert_eq!(summary.changed, 64);
        assert_eq!(grid.count(Material::Sand), 64);

        // Extreme centres still clip to the grid without overflowing.
        assert_eq!(brush.stencil(&grid, (i32::MIN, i32::MAX)).count(), 64);
    }

    #[test]
    fn paint_fills_only_empty_cells() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, Cell::new(Material::Water));
        let brush = Brush::new(Tool::Paint(Material::Sand), 1).unwrap();

        let summary = brush.apply(&mut grid, (2, 2), 1.0, &mut always());
        assert_eq!(summary, PaintSummary { candidates: 5, accepted: 5, changed: 4 });
        assert_eq!(grid.material(2, 2), Some(Material::Water));
        assert_eq!(grid.count(Material::Sand), 4);
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            let cell = grid.get(x, y).unwrap();
            assert!(!cell.is_static);
            assert!((-12.5..12.5).contains(&cell.jitter));
        }
    }

    #[test]
    fn erase_overwrites_anything() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 2, Cell::settled_stone());
        grid.set(2, 3, Cell::new(Material::Water));
        let brush = Brush::new(Tool::Erase, 1).unwrap();

        let summary = brush.apply(&mut grid, (2, 2), 1.0, &mut always());
        assert_eq!(summary.changed, 2);
        assert!(grid.cells().iter().all(|c| c.is_empty() && !c.is_static));
    }

    #[test]
    fn zero_probability_touches_nothing() {
        let mut grid = Grid::new(8, 8);
        let brush = Brush::new(Tool::Paint(Material::Sand), 3).unwrap();
        let summary = brush.apply(&mut grid, (4, 4), 0.0, &mut SmallRng::seed_from_u64(0));
        assert_eq!(summary.accepted, 0);
        assert_eq!(grid.count(Material::Sand), 0);
    }

    #[test]
    fn kept_fraction_converges_to_three_quarters() {
        let brush = Brush::new(Tool::Paint(Material::Stone), 3).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut candidates = 0;
        let mut painted = 0;
        for _ in 0..2_000 {
            let mut grid = Grid::new(11, 11);
            let summary = brush.apply(&mut grid, (5, 5), 0.75, &mut rng);
            candidates += summary.candidates;
            painted += grid.count(Material::Stone);
            for (x, y) in (0..11).flat_map(|y| (0..11).map(move |x| (x, y))) {
                if grid.material(x, y) == Some(Material::Stone) {
                    assert!((x - 5) * (x - 5) + (y - 5) * (y - 5) <= 9);
                }
            }
        }
        let fraction = painted as f64 / candidates as f64;
        assert!((fraction - 0.75).abs() < 0.01, "fraction={fraction}");
    }

    proptest! {
        #[test]
        fn prop_erase_is_idempotent(
            occupied in proptest::collection::vec(any::<bool>(), 64),
            cx in 0i32..8,
            cy in 0i32..8,
            radius in 1u32..5,
        ) {
            let mut grid = Grid::new(8, 8);
            for (i, &full) in occupied.iter().enumerate() {
                if full {
                    grid.set((i % 8) as i32, (i / 8) as i32, Cell::settled_stone());
                }
            }
            let brush = Brush::new(Tool::Erase, radius).unwrap();
            brush.apply(&mut grid, (cx, cy), 1.0, &mut always());
            let once = grid.cells().to_vec();
            for (x, y) in brush.stencil(&grid, (cx, cy)).collect::<Vec<_>>() {
                let cell = grid.get(x, y).unwrap();
                prop_assert!(cell.is_empty() && !cell.is_static);
            }

            let again = brush.apply(&mut grid, (cx, cy), 1.0, &mut always());
            prop_assert_eq!(again.changed, 0);
            prop_assert_eq!(grid.cells(), once.as_slice());
        }
    }
}
