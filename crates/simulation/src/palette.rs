//! Material colors for the renderer.
//!
//! A cell's jitter shifts lightness by the full amount and saturation by
//! half of it, clamped so no particle washes out to white or black.

use crate::cell::Material;

/// Canvas background behind empty cells.
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hsl {
    /// Degrees, `[0, 360)`.
    pub h: f32,
    /// Percent.
    pub s: f32,
    /// Percent.
    pub l: f32,
}

impl Hsl {
    #[must_use]
    pub fn to_rgb(self) -> [u8; 3] {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

#[must_use]
pub fn base_color(material: Material) -> Option<Hsl> {
    match material {
        Material::Empty => None,
        Material::Sand => Some(Hsl { h: 48.0, s: 85.0, l: 55.0 }),
        Material::Water => Some(Hsl { h: 210.0, s: 75.0, l: 58.0 }),
        Material::Stone => Some(Hsl { h: 220.0, s: 5.0, l: 55.0 }),
    }
}

#[must_use]
pub fn shade(material: Material, jitter: f32) -> Option<Hsl> {
    base_color(material).map(|base| Hsl {
        h: base.h,
        s: (base.s + jitter * 0.5).clamp(0.0, 100.0),
        l: (base.l + jitter).clamp(25.0, 75.0),
    })
}

/// Display color of one cell.
#[must_use]
pub fn pixel(material: Material, jitter: f32) -> [u8; 3] {
    shade(material, jitter).map_or(BACKGROUND, Hsl::to_rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_background() {
        assert_eq!(pixel(Material::Empty, 7.0), BACKGROUND);
    }

    #[test]
    fn sand_base_color() {
        assert_eq!(pixel(Material::Sand, 0.0), [238, 199, 43]);
    }

    #[test]
    fn jitter_is_clamped() {
        let dark = shade(Material::Water, -100.0).unwrap();
        assert!((dark.l - 25.0).abs() < f32::EPSILON);
        assert!((dark.s - 25.0).abs() < f32::EPSILON);

        let grey = shade(Material::Stone, -10.0).unwrap();
        assert!(grey.s.abs() < f32::EPSILON);
        assert_eq!(grey.to_rgb(), [115, 115, 115]);
    }

    #[test]
    fn primary_hues() {
        assert_eq!(Hsl { h: 0.0, s: 100.0, l: 50.0 }.to_rgb(), [255, 0, 0]);
        assert_eq!(Hsl { h: 120.0, s: 100.0, l: 50.0 }.to_rgb(), [0, 255, 0]);
        assert_eq!(Hsl { h: 240.0, s: 100.0, l: 50.0 }.to_rgb(), [0, 0, 255]);
    }
}
