//! Simulation configuration and the errors raised when it is invalid.
//!
//! Validation happens here, once, at the configuration boundary. The
//! per-tick path assumes a well-formed grid and never fails.

use thiserror::Error;

pub const DEFAULT_WIDTH: usize = 160;
pub const DEFAULT_HEIGHT: usize = 120;
pub const DEFAULT_BRUSH_RADIUS: u32 = 4;

/// Chance that a cell inside the brush stencil is touched on a given tick.
pub const DEFAULT_PAINT_PROBABILITY: f64 = 0.75;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("grid dimensions {width}x{height} exceed the addressable range")]
    GridTooLarge { width: usize, height: usize },
    #[error("brush radius must be at least 1, got {0}")]
    BrushRadius(i64),
    #[error("paint probability must lie within [0, 1], got {0}")]
    PaintProbability(f64),
    #[error("unknown material id {0}")]
    UnknownMaterial(u8),
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub paint_probability: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            paint_probability: DEFAULT_PAINT_PROBABILITY,
        }
    }
}

impl SimConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either dimension is zero or does not fit
    /// in `i32` grid coordinates.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        let config = Self {
            width,
            height,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::PaintProbability`] if `p` is outside `[0, 1]`.
    pub fn with_paint_probability(self, p: f64) -> Result<Self, ConfigError> {
        let config = Self {
            paint_probability: p,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found in this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyGrid { width, height });
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(ConfigError::GridTooLarge { width, height });
        }
        if !(0.0..=1.0).contains(&self.paint_probability) {
            return Err(ConfigError::PaintProbability(self.paint_probability));
        }
        Ok(())
    }
}
