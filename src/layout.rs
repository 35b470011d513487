//! Canonical figure geometry.
//!
//! [`LayoutEngine::build`] turns caller-supplied domain bounds into the
//! immutable [`Layout`] of one figure: pixel size, axis limits expanded by the
//! margin policy, font sizes, and the data-to-pixel projection used by the
//! rasterizer. A `Layout` never changes after the figure is created.

use glam::DVec2;

use crate::config::RenderConfig;
use crate::errors::LayoutError;
use crate::render::Figure;
use crate::types::{Bounds, Rgb};

/// Pixel margins around the plot area, sized for title, tick labels and the
/// axis captions.
const LEFT_MARGIN: u32 = 85;
const RIGHT_MARGIN: u32 = 55;
const TOP_MARGIN: u32 = 70;
const BOTTOM_MARGIN: u32 = 95;

const TITLE_FONTSIZE: u32 = 30;
const AXIS_FONTSIZE: u32 = 24;

/// Immutable geometry of a single figure.
#[derive(Clone, Debug)]
pub struct Layout {
    /// Canvas size in pixels.
    pub figsize_px: (u32, u32),
    /// Axis limits in data space (domain bounds plus margin).
    pub limits: Bounds,
    pub title_fontsize: u32,
    pub axis_fontsize: u32,
    /// Whether the origin lies inside the limits, so the origin marker and
    /// zero axes can be drawn.
    pub origin_visible: bool,
}

impl Layout {
    pub fn xlim(&self) -> (f64, f64) {
        self.limits.xlim()
    }

    pub fn ylim(&self) -> (f64, f64) {
        self.limits.ylim()
    }

    /// Pixel rectangle of the plot area: (left, top, right, bottom).
    pub fn plot_area(&self) -> (i32, i32, i32, i32) {
        (
            LEFT_MARGIN as i32,
            TOP_MARGIN as i32,
            self.figsize_px.0 as i32 - RIGHT_MARGIN as i32,
            self.figsize_px.1 as i32 - BOTTOM_MARGIN as i32,
        )
    }

    /// Project a data-space point into pixel coordinates. The y-axis flips:
    /// data grows upward, pixels grow downward.
    pub fn to_px(&self, p: DVec2) -> (i32, i32) {
        let (left, top, right, bottom) = self.plot_area();
        let (x0, x1) = self.xlim();
        let (y0, y1) = self.ylim();
        let fx = (p.x - x0) / (x1 - x0);
        let fy = (p.y - y0) / (y1 - y0);
        (
            left + (fx * (right - left) as f64).round() as i32,
            bottom - (fy * (bottom - top) as f64).round() as i32,
        )
    }

    /// A data-space point at the given fractions of each axis span.
    pub fn at_fraction(&self, fx: f64, fy: f64) -> DVec2 {
        let (x0, x1) = self.xlim();
        let (y0, y1) = self.ylim();
        DVec2::new(x0 + fx * (x1 - x0), y0 + fy * (y1 - y0))
    }
}

/// Builds layouts under one rendering configuration.
#[derive(Clone, Debug)]
pub struct LayoutEngine<'a> {
    config: &'a RenderConfig,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        LayoutEngine { config }
    }

    /// Build the layout for one figure.
    ///
    /// `xlim`/`ylim` are `domain_bounds` expanded by `margin_ratio` on each
    /// side; pass `None` to use the configured default policy.
    pub fn build(
        &self,
        figsize_px: (u32, u32),
        domain_bounds: Bounds,
        margin_ratio: Option<f64>,
    ) -> Result<Layout, LayoutError> {
        let margin = margin_ratio.unwrap_or(self.config.margin_ratio);
        let limits = domain_bounds.validated()?.expanded(margin);
        let origin_visible = limits.contains(DVec2::ZERO);
        Ok(Layout {
            figsize_px,
            limits,
            title_fontsize: TITLE_FONTSIZE,
            axis_fontsize: AXIS_FONTSIZE,
            origin_visible,
        })
    }

    /// Build with the configured default figure size.
    pub fn build_default(&self, domain_bounds: Bounds) -> Result<Layout, LayoutError> {
        self.build(self.config.figsize_px, domain_bounds, None)
    }

    /// Draw the x/y axes through zero, the origin dot with its "O" label, and
    /// arrowheads near the positive limits. No-op when the origin is outside
    /// the limits: an origin marker is never drawn off-canvas.
    pub fn draw_origin_marker(&self, figure: &mut Figure) {
        let layout = figure.layout().clone();
        if !layout.origin_visible {
            return;
        }
        let (x0, x1) = layout.xlim();
        let (y0, y1) = layout.ylim();
        let axis_color = Rgb::BLACK;
        let width = self.config.axis_width.max(1);

        figure.push_line(
            vec![DVec2::new(x0, 0.0), DVec2::new(x1, 0.0)],
            axis_color,
            width,
            false,
        );
        figure.push_line(
            vec![DVec2::new(0.0, y0), DVec2::new(0.0, y1)],
            axis_color,
            width,
            false,
        );
        figure.push_marker(DVec2::ZERO, axis_color, 4, axis_color);

        // "O" label offset into the fourth quadrant, a small fraction of
        // each span so it stays near the origin for any domain.
        let offset = DVec2::new(layout.limits.width() * 0.015, -layout.limits.height() * 0.03);
        figure.push_text(offset, "O", layout.axis_fontsize, axis_color);

        // Arrowheads on the positive axis ends, only when the positive range
        // is a large enough share of the span to carry them. The threshold is
        // relative so small-scale domains keep their arrowheads.
        if x1 > layout.limits.width() * 0.1 {
            figure.push_arrow(
                DVec2::new(x1 * 0.85, 0.0),
                DVec2::new(x1 * 0.95, 0.0),
                axis_color,
                width,
            );
        }
        if y1 > layout.limits.height() * 0.1 {
            figure.push_arrow(
                DVec2::new(0.0, y1 * 0.85),
                DVec2::new(0.0, y1 * 0.95),
                axis_color,
                width,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_config() -> RenderConfig {
        RenderConfig::default()
    }

    #[test]
    fn build_expands_bounds_by_margin() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((0.0, 10.0), (0.0, 10.0)), Some(0.1))
            .unwrap();
        assert_eq!(layout.xlim(), (-1.0, 11.0));
        assert_eq!(layout.ylim(), (-1.0, 11.0));
        assert!(layout.origin_visible);
    }

    #[test]
    fn build_rejects_degenerate_bounds() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let err = engine
            .build((800, 600), Bounds::new((1.0, 1.0), (0.0, 2.0)), None)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidBounds));
    }

    #[test]
    fn origin_outside_limits_is_not_visible() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((5.0, 10.0), (5.0, 10.0)), Some(0.0))
            .unwrap();
        assert!(!layout.origin_visible);
    }

    #[test]
    fn origin_marker_is_noop_off_canvas() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((5.0, 10.0), (5.0, 10.0)), Some(0.0))
            .unwrap();
        let mut figure = Figure::new(layout);
        engine.draw_origin_marker(&mut figure);
        assert_eq!(figure.primitive_count(), 0);
    }

    #[test]
    fn origin_marker_draws_axes_and_label() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((-2.0, 2.0), (-2.0, 2.0)), None)
            .unwrap();
        let mut figure = Figure::new(layout);
        engine.draw_origin_marker(&mut figure);
        // Two axis lines, origin dot, "O" label, two arrowheads.
        assert_eq!(figure.primitive_count(), 6);
    }

    #[test]
    fn origin_marker_keeps_arrowheads_on_small_domains() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        // Well below unit scale; arrowheads must still appear on both axes.
        let layout = engine
            .build((800, 600), Bounds::new((-0.4, 0.4), (-0.4, 0.4)), None)
            .unwrap();
        let mut figure = Figure::new(layout);
        engine.draw_origin_marker(&mut figure);
        assert_eq!(figure.primitive_count(), 6);
    }

    #[test]
    fn projection_corners_map_to_plot_area() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((0.0, 1.0), (0.0, 1.0)), Some(0.0))
            .unwrap();
        let (left, top, right, bottom) = layout.plot_area();
        assert_eq!(layout.to_px(DVec2::new(0.0, 0.0)), (left, bottom));
        assert_eq!(layout.to_px(DVec2::new(1.0, 1.0)), (right, top));
    }

    #[test]
    fn projection_flips_y() {
        let config = engine_config();
        let engine = LayoutEngine::new(&config);
        let layout = engine
            .build((800, 600), Bounds::new((0.0, 1.0), (0.0, 1.0)), Some(0.0))
            .unwrap();
        let low = layout.to_px(DVec2::new(0.5, 0.1));
        let high = layout.to_px(DVec2::new(0.5, 0.9));
        assert!(high.1 < low.1);
    }
}
