//! Deterministic category colors.
//!
//! Hues are spread evenly around the color wheel; saturation and lightness
//! cycle through short fixed patterns so neighbouring categories stay
//! distinguishable even when their hues are close.

use serde::{Deserialize, Serialize};

const SATURATION_STEPS: [f64; 3] = [70.0, 60.0, 80.0];
const LIGHTNESS_STEPS: [f64; 2] = [55.0, 45.0];

/// Lightness shift for the shaded (side) faces.
pub const SHADOW_SHIFT: f64 = -15.0;

/// Lightness shift for the lit (top) face of a column.
pub const HIGHLIGHT_SHIFT: f64 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const TEXT: Rgb = Rgb::new(51, 51, 51);
    pub const MUTED: Rgb = Rgb::new(102, 102, 102);
    pub const BORDER: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Same hue and saturation, lightness moved by `delta` percent points.
    pub fn shifted(&self, delta: f64) -> Self {
        Self {
            l: (self.l + delta).clamp(0.0, 100.0),
            ..*self
        }
    }

    pub fn to_rgb(&self) -> Rgb {
        let s = self.s / 100.0;
        let l = self.l / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }
}

/// HSL color of category `index` among `total` categories.
pub fn hsl_for(index: usize, total: usize) -> Hsl {
    let total = total.max(1);
    Hsl {
        h: (index as f64 * 360.0 / total as f64).rem_euclid(360.0),
        s: SATURATION_STEPS[index % SATURATION_STEPS.len()],
        l: LIGHTNESS_STEPS[index % LIGHTNESS_STEPS.len()],
    }
}

/// RGB color of category `index` among `total` categories.
pub fn color_for(index: usize, total: usize) -> Rgb {
    hsl_for(index, total).to_rgb()
}
