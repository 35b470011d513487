//! Geometric and color primitives shared across the figure pipeline.
//!
//! Data-space coordinates are plain `glam::DVec2`; the types here add the
//! small amount of structure the pipeline needs on top: validated axis-aligned
//! bounds and an RGB color value.

use glam::DVec2;

use crate::errors::LayoutError;

/// Axis-aligned rectangle in data space.
///
/// Used both for caller-supplied domain bounds and for the computed axis
/// limits of a layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Create an empty bounds (will expand on first point).
    pub fn empty() -> Self {
        Bounds {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Create bounds from explicit axis intervals.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Bounds {
            min: DVec2::new(xlim.0, ylim.0),
            max: DVec2::new(xlim.1, ylim.1),
        }
    }

    /// Check if the bounds were never expanded.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point.
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    pub fn xlim(&self) -> (f64, f64) {
        (self.min.x, self.max.x)
    }

    pub fn ylim(&self) -> (f64, f64) {
        (self.min.y, self.max.y)
    }

    /// Check whether a point lies inside (inclusive).
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Return bounds grown by `margin_ratio` of each axis span, per side.
    pub fn expanded(&self, margin_ratio: f64) -> Bounds {
        let margin = DVec2::new(self.width() * margin_ratio, self.height() * margin_ratio);
        Bounds {
            min: self.min - margin,
            max: self.max + margin,
        }
    }

    /// Validate that both spans are positive and finite.
    pub fn validated(self) -> Result<Bounds, LayoutError> {
        let finite = self.min.is_finite() && self.max.is_finite();
        if !finite || self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(LayoutError::InvalidBounds);
        }
        Ok(self)
    }
}

/// Opaque RGB color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Unpack a `0xRRGGBB` literal, matching the hex notation of the palettes.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    /// Blend this color toward `other`; `t` = 0 keeps self, `t` = 1 gives other.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Composite over a white background with the given alpha, the way a
    /// translucent region fill appears on a white canvas.
    pub fn over_white(self, alpha: f64) -> Rgb {
        Rgb::WHITE.mix(self, alpha)
    }
}
