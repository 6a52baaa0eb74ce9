//! WASM entry point: owns a [`Simulation`] and the buffers the browser reads.
//!
//! JavaScript reports pointer events in element pixels; this adapter turns
//! them into grid cells, calls `tick` once per animation frame and keeps a
//! material buffer, a jitter buffer and an RGBA image in wasm memory for
//! zero-copy rendering.

use wasm_bindgen::prelude::*;

use crate::brush::Tool;
use crate::cell::Material;
use crate::config::{ConfigError, SimConfig};
use crate::palette;
use crate::Simulation;

/// Map a pointer position inside a `rect_width` x `rect_height` element onto
/// a grid cell, clamped to the grid.
#[must_use]
pub fn pointer_to_cell(
    px: f64,
    py: f64,
    rect_width: f64,
    rect_height: f64,
    width: usize,
    height: usize,
) -> (i32, i32) {
    let axis = |p: f64, extent: f64, cells: usize| {
        let max = cells.saturating_sub(1) as f64;
        if extent <= 0.0 || !p.is_finite() {
            return 0;
        }
        (p * cells as f64 / extent).floor().clamp(0.0, max) as i32
    };
    (
        axis(px, rect_width, width),
        axis(py, rect_height, height),
    )
}

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    sim: Simulation,
    pointer_down: bool,
    pointer_cell: Option<(i32, i32)>,
    materials: Vec<u8>,
    jitter: Vec<f32>,
    pixels: Vec<u8>,
}

impl Universe {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the grid dimensions are invalid.
    pub fn try_new(width: usize, height: usize, seed: u32) -> Result<Self, ConfigError> {
        let sim = Simulation::new(SimConfig::new(width, height)?, u64::from(seed))?;
        let mut universe = Self {
            sim,
            pointer_down: false,
            pointer_cell: None,
            materials: Vec::new(),
            jitter: Vec::new(),
            pixels: Vec::new(),
        };
        universe.sync_buffers();
        Ok(universe)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown material id or a radius below 1.
    pub fn try_set_brush(&mut self, material: u8, radius: i32) -> Result<(), ConfigError> {
        let material = Material::from_u8(material).ok_or(ConfigError::UnknownMaterial(material))?;
        let radius = u32::try_from(radius).map_err(|_| ConfigError::BrushRadius(radius.into()))?;
        self.sim.set_brush(Tool::from_material(material), radius)
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    fn sync_buffers(&mut self) {
        let view = self.sim.snapshot();
        let cells = view.width() * view.height();
        self.materials.clear();
        self.jitter.clear();
        self.pixels.clear();
        self.materials.reserve(cells);
        self.jitter.reserve(cells);
        self.pixels.reserve(cells * 4);
        for (material, jitter) in view.iter() {
            self.materials.push(material as u8);
            self.jitter.push(jitter);
            let [r, g, b] = palette::pixel(material, jitter);
            self.pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }

    fn locate(&self, px: f64, py: f64, rect_width: f64, rect_height: f64) -> (i32, i32) {
        let view = self.sim.snapshot();
        pointer_to_cell(px, py, rect_width, rect_height, view.width(), view.height())
    }
}

#[wasm_bindgen]
impl Universe {
    /// # Errors
    ///
    /// Throws if the grid dimensions are invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, seed: u32) -> Result<Universe, JsError> {
        Ok(Self::try_new(width, height, seed)?)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.sim.snapshot().width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.sim.snapshot().height()
    }

    /// # Errors
    ///
    /// Throws for an unknown material id or a radius below 1.
    pub fn set_brush(&mut self, material: u8, radius: i32) -> Result<(), JsError> {
        Ok(self.try_set_brush(material, radius)?)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.sim.set_paused(paused);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.sim.is_paused()
    }

    pub fn reset(&mut self) {
        self.sim.reset();
        self.sync_buffers();
    }

    pub fn pointer_down(&mut self, px: f64, py: f64, rect_width: f64, rect_height: f64) {
        self.pointer_down = true;
        self.pointer_cell = Some(self.locate(px, py, rect_width, rect_height));
    }

    pub fn pointer_move(&mut self, px: f64, py: f64, rect_width: f64, rect_height: f64) {
        self.pointer_cell = Some(self.locate(px, py, rect_width, rect_height));
    }

    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    /// Advance one animation frame and refresh the render buffers.
    pub fn tick(&mut self) {
        self.sim.tick(self.pointer_down, self.pointer_cell);
        self.sync_buffers();
    }

    #[must_use]
    pub fn materials_ptr(&self) -> *const u8 {
        self.materials.as_ptr()
    }

    #[must_use]
    pub fn jitter_ptr(&self) -> *const f32 {
        self.jitter.as_ptr()
    }

    /// RGBA, one pixel per cell, row-major.
    #[must_use]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }
}
