//! Region description and fill rendering.
//!
//! A region's boundary is either a pair of sampled functions over a shared
//! domain (X-type / Y-type integration regions) or a closed parametric curve
//! (polar disks, cardioids). The renderer samples at the configured
//! resolution, fills the enclosed polygon with the scheme's fill color
//! composited over the background, then strokes the boundary.
//!
//! Crossing boundaries are not auto-detected: where `upper < lower` the fill
//! is degenerate for that sub-range. Callers must pre-split the domain at
//! crossing points, the way the polynomial-region examples do.

use glam::DVec2;

use crate::config::RenderConfig;
use crate::render::Figure;
use crate::style::{ColorKey, ColorScheme};
use crate::types::Rgb;

/// Scalar boundary function `y = f(x)` (or `x = f(y)` for Y-type regions).
pub type BoundaryFn = Box<dyn Fn(f64) -> f64>;

/// Parametric curve `t -> (x, y)`.
pub type ParametricFn = Box<dyn Fn(f64) -> DVec2>;

/// How a region's boundary is described.
pub enum BoundarySpec {
    /// Two functions over a shared domain; the fill spans between them.
    FunctionPair {
        domain: (f64, f64),
        lower: BoundaryFn,
        upper: BoundaryFn,
    },
    /// A parametric curve over a parameter range; the polygon is closed by
    /// joining the last sample back to the first.
    Parametric {
        range: (f64, f64),
        curve: ParametricFn,
    },
}

/// A 2D region to fill and label.
pub struct Region {
    pub boundary: BoundarySpec,
    pub fill: ColorKey,
    pub edge: ColorKey,
    pub label: Option<String>,
}

impl Region {
    /// Region between two boundary functions over `domain`.
    pub fn between(
        domain: (f64, f64),
        lower: impl Fn(f64) -> f64 + 'static,
        upper: impl Fn(f64) -> f64 + 'static,
    ) -> Self {
        Region {
            boundary: BoundarySpec::FunctionPair {
                domain,
                lower: Box::new(lower),
                upper: Box::new(upper),
            },
            fill: ColorKey::LightBlue,
            edge: ColorKey::Primary,
            label: None,
        }
    }

    /// Region enclosed by a parametric curve over `range`.
    pub fn parametric(range: (f64, f64), curve: impl Fn(f64) -> DVec2 + 'static) -> Self {
        Region {
            boundary: BoundarySpec::Parametric {
                range,
                curve: Box::new(curve),
            },
            fill: ColorKey::LightBlue,
            edge: ColorKey::Primary,
            label: None,
        }
    }

    pub fn with_colors(mut self, fill: ColorKey, edge: ColorKey) -> Self {
        self.fill = fill;
        self.edge = edge;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Sample `f` at `n` evenly spaced points over `domain` (inclusive ends).
pub(crate) fn sample_fn(domain: (f64, f64), f: &dyn Fn(f64) -> f64, n: usize) -> Vec<DVec2> {
    let (a, b) = domain;
    let step = (b - a) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let x = a + step * i as f64;
            DVec2::new(x, f(x))
        })
        .collect()
}

fn sample_parametric(range: (f64, f64), curve: &dyn Fn(f64) -> DVec2, n: usize) -> Vec<DVec2> {
    let (a, b) = range;
    let step = (b - a) / (n - 1) as f64;
    (0..n).map(|i| curve(a + step * i as f64)).collect()
}

/// Fills regions and draws boundary overlays against one color scheme.
pub struct RegionRenderer<'a> {
    scheme: &'a ColorScheme,
    config: &'a RenderConfig,
}

impl<'a> RegionRenderer<'a> {
    pub fn new(scheme: &'a ColorScheme, config: &'a RenderConfig) -> Self {
        RegionRenderer { scheme, config }
    }

    /// Fill `region` into the figure: polygon first, boundary strokes on top.
    pub fn fill(&self, figure: &mut Figure, region: &Region) {
        let n = self.config.effective_samples();
        let fill = self
            .scheme
            .color(region.fill)
            .over_white(self.config.fill_alpha);
        let edge = self.scheme.color(region.edge);

        match &region.boundary {
            BoundarySpec::FunctionPair { domain, lower, upper } => {
                let lower_pts = sample_fn(*domain, lower.as_ref(), n);
                let upper_pts = sample_fn(*domain, upper.as_ref(), n);

                // Polygon walks the lower boundary forward, the upper one back.
                let mut polygon = lower_pts.clone();
                polygon.extend(upper_pts.iter().rev().copied());
                figure.push_polygon(polygon, fill);

                figure.push_line(upper_pts, edge, self.config.curve_width, false);
                figure.push_line(lower_pts, edge, self.config.curve_width, false);
            }
            BoundarySpec::Parametric { range, curve } => {
                let mut pts = sample_parametric(*range, curve.as_ref(), n);
                figure.push_polygon(pts.clone(), fill);
                // Close the outline back to the first sample.
                if let Some(&first) = pts.first() {
                    pts.push(first);
                }
                figure.push_line(pts, edge, self.config.curve_width, false);
            }
        }

        if let Some(label) = &region.label {
            figure.push_legend(label.clone(), edge);
        }
    }

    /// Draw a labeled curve without a fill (boundary-only overlays).
    pub fn curve(
        &self,
        figure: &mut Figure,
        domain: (f64, f64),
        f: impl Fn(f64) -> f64,
        color: ColorKey,
        label: Option<&str>,
    ) {
        let pts = sample_fn(domain, &f, self.config.effective_samples());
        let rgb = self.scheme.color(color);
        figure.push_line(pts, rgb, self.config.curve_width, false);
        if let Some(label) = label {
            figure.push_legend(label, rgb);
        }
    }

    /// Dashed vertical guide line spanning the figure's y-limits.
    pub fn vertical_line(&self, figure: &mut Figure, x: f64, color: ColorKey, label: Option<&str>) {
        let (y0, y1) = figure.layout().ylim();
        let rgb = self.scheme.color(color);
        figure.push_line(
            vec![DVec2::new(x, y0), DVec2::new(x, y1)],
            rgb,
            self.config.curve_width,
            true,
        );
        if let Some(label) = label {
            figure.push_legend(label, rgb);
        }
    }

    /// Emphasized segment at `x` between two boundary values, the inner
    /// integration line of an X-type region sketch.
    pub fn integration_segment(
        &self,
        figure: &mut Figure,
        x: f64,
        y_range: (f64, f64),
        color: ColorKey,
    ) {
        let rgb = self.scheme.color(color);
        let (y0, y1) = y_range;
        figure.push_line(
            vec![DVec2::new(x, y0), DVec2::new(x, y1)],
            rgb,
            self.config.curve_width + 2,
            false,
        );
        figure.push_marker(DVec2::new(x, y0), rgb, 5, Rgb::WHITE);
        figure.push_marker(DVec2::new(x, y1), rgb, 5, Rgb::WHITE);
    }
}
