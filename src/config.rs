//! Immutable rendering configuration.
//!
//! One `RenderConfig` value is built up front and passed by reference to every
//! component constructor. Nothing in the pipeline mutates it after creation;
//! there is no process-global rendering state.

use crate::types::Rgb;

/// Minimum sampling resolution for region boundaries.
pub const MIN_SAMPLES: usize = 100;

/// Output resolution metadata written into the PNG pHYs chunk.
pub const DEFAULT_DPI: u32 = 300;

/// Rendering configuration, fixed for the lifetime of a plotter.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// DPI recorded in the output PNG metadata.
    pub dpi: u32,
    /// Canvas size in pixels (width, height).
    pub figsize_px: (u32, u32),
    /// Sample count for region boundaries; clamped up to [`MIN_SAMPLES`].
    pub samples: usize,
    /// Fraction of each axis span added as margin per side.
    pub margin_ratio: f64,
    /// Canvas background color.
    pub background: Rgb,
    /// Stroke width for boundary curves, in pixels.
    pub curve_width: u32,
    /// Stroke width for axes and grid lines, in pixels.
    pub axis_width: u32,
    /// Opacity of region fills, composited over the background.
    pub fill_alpha: f64,
    /// TTF/OTF font data for label text. When absent, text primitives
    /// degrade to a logged warning instead of failing the figure.
    pub font_data: Option<&'static [u8]>,
    /// Font family name to register the data under.
    pub font_family: &'static str,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            dpi: DEFAULT_DPI,
            figsize_px: (1400, 1000),
            samples: 200,
            margin_ratio: 0.1,
            background: Rgb::WHITE,
            curve_width: 3,
            axis_width: 1,
            fill_alpha: 0.35,
            font_data: None,
            font_family: "sans-serif",
        }
    }
}

impl RenderConfig {
    /// Effective boundary sample count, never below [`MIN_SAMPLES`].
    pub fn effective_samples(&self) -> usize {
        self.samples.max(MIN_SAMPLES)
    }

    /// Provide an embedded font for label text.
    pub fn with_font(mut self, family: &'static str, data: &'static [u8]) -> Self {
        self.font_family = family;
        self.font_data = Some(data);
        self
    }
}
