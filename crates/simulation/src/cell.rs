//! Cell and Material types for the simulation grid.

use std::fmt;

/// Jitter span rolled for every cell of a freshly reset grid, giving `[-10, 10)`.
pub const RESET_JITTER_SPAN: f32 = 20.0;

/// Jitter span rolled for a freshly painted cell, giving `[-12.5, 12.5)`.
pub const PAINT_JITTER_SPAN: f32 = 25.0;

/// Discriminant values map directly to the renderer's material buffer — do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Material {
    #[default]
    Empty = 0,
    Sand = 1,
    Water = 2,
    Stone = 3,
}

impl Material {
    pub const ALL: [Material; 4] = [
        Material::Empty,
        Material::Sand,
        Material::Water,
        Material::Stone,
    ];

    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Sand => write!(f, "Sand"),
            Self::Water => write!(f, "Water"),
            Self::Stone => write!(f, "Stone"),
        }
    }
}

/// One particle slot. All fields travel together on every move and swap.
///
/// `clock` holds the generation of the last pass that moved this particle;
/// the scheduler uses it to evaluate each particle at most once per pass.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub material: Material,
    pub is_static: bool,
    pub jitter: f32,
    pub clock: u32,
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.material)
    }
}

impl Cell {
    #[must_use]
    pub fn new(material: Material) -> Self {
        Self::with_jitter(material, 0.0)
    }

    #[must_use]
    pub fn with_jitter(material: Material, jitter: f32) -> Self {
        Self {
            material,
            is_static: false,
            jitter,
            clock: 0,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Material::Empty)
    }

    /// A stone that has already come to rest.
    #[must_use]
    pub fn settled_stone() -> Self {
        Self {
            is_static: true,
            ..Self::new(Material::Stone)
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.material == Material::Empty
    }
}
