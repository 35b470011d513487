//! Per-figure scene model.
//!
//! Components build a [`Figure`] by pushing drawing primitives; the
//! rasterizer consumes the finished scene in one pass. Split this way, the
//! canvas resource only exists inside the rasterization scope and is always
//! released before the next figure is built, including on error.
//!
//! A `Figure` is created per diagram and discarded after persistence. No
//! state crosses figure boundaries.

pub mod raster;

use glam::DVec2;

use crate::layout::Layout;
use crate::slots::PositionSlotAllocator;
use crate::types::Rgb;

/// Rounded-box styling for callout text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBox {
    pub face: Rgb,
    pub edge: Rgb,
}

/// One drawing primitive, in insertion order.
#[derive(Clone, Debug)]
pub(crate) enum Primitive {
    Line {
        points: Vec<DVec2>,
        color: Rgb,
        width: u32,
        dashed: bool,
    },
    /// Closed polygon, fill color already composited against the background.
    Polygon { points: Vec<DVec2>, fill: Rgb },
    Marker {
        at: DVec2,
        color: Rgb,
        radius: u32,
        edge: Rgb,
    },
    Arrow {
        from: DVec2,
        to: DVec2,
        color: Rgb,
        width: u32,
    },
    Text {
        at: DVec2,
        content: String,
        size: u32,
        color: Rgb,
        boxed: Option<TextBox>,
    },
}

/// A legend entry collected while the scene is built; drawn at the fixed
/// upper-right position.
#[derive(Clone, Debug)]
pub(crate) struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}

/// One figure being assembled: layout, primitive list, title, legend, and
/// the per-figure annotation slots.
#[derive(Debug)]
pub struct Figure {
    layout: Layout,
    primitives: Vec<Primitive>,
    title: Option<String>,
    legend: Vec<LegendEntry>,
    slots: PositionSlotAllocator,
    /// Grid line color; resolved from the active scheme at creation.
    grid_color: Rgb,
    /// Axis caption and tick label color.
    axis_color: Rgb,
    /// Axis captions, localized by the caller.
    axis_labels: (String, String),
}

impl Figure {
    /// Create an empty figure over a layout, with neutral chrome colors.
    pub fn new(layout: Layout) -> Self {
        let slots = PositionSlotAllocator::for_layout(&layout);
        Figure {
            layout,
            primitives: Vec::new(),
            title: None,
            legend: Vec::new(),
            slots,
            grid_color: Rgb::new(0xBD, 0xC3, 0xC7),
            axis_color: Rgb::new(0x2C, 0x3E, 0x50),
            axis_labels: ("x".to_string(), "y".to_string()),
        }
    }

    /// Override the grid and axis chrome colors.
    pub fn with_chrome(mut self, grid: Rgb, axis: Rgb) -> Self {
        self.grid_color = grid;
        self.axis_color = axis;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The figure's annotation slots.
    pub fn slots_mut(&mut self) -> &mut PositionSlotAllocator {
        &mut self.slots
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_axis_labels(&mut self, x: impl Into<String>, y: impl Into<String>) {
        self.axis_labels = (x.into(), y.into());
    }

    pub(crate) fn axis_labels(&self) -> (&str, &str) {
        (&self.axis_labels.0, &self.axis_labels.1)
    }

    /// Number of primitives pushed so far.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub(crate) fn grid_color(&self) -> Rgb {
        self.grid_color
    }

    pub(crate) fn axis_color(&self) -> Rgb {
        self.axis_color
    }

    pub(crate) fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub(crate) fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub(crate) fn push_legend(&mut self, label: impl Into<String>, color: Rgb) {
        self.legend.push(LegendEntry {
            label: label.into(),
            color,
        });
    }

    pub(crate) fn push_line(&mut self, points: Vec<DVec2>, color: Rgb, width: u32, dashed: bool) {
        self.primitives.push(Primitive::Line {
            points,
            color,
            width,
            dashed,
        });
    }

    pub(crate) fn push_polygon(&mut self, points: Vec<DVec2>, fill: Rgb) {
        self.primitives.push(Primitive::Polygon { points, fill });
    }

    pub(crate) fn push_marker(&mut self, at: DVec2, color: Rgb, radius: u32, edge: Rgb) {
        self.primitives.push(Primitive::Marker {
            at,
            color,
            radius,
            edge,
        });
    }

    pub(crate) fn push_arrow(&mut self, from: DVec2, to: DVec2, color: Rgb, width: u32) {
        self.primitives.push(Primitive::Arrow {
            from,
            to,
            color,
            width,
        });
    }

    pub(crate) fn push_text(&mut self, at: DVec2, content: impl Into<String>, size: u32, color: Rgb) {
        self.primitives.push(Primitive::Text {
            at,
            content: content.into(),
            size,
            color,
            boxed: None,
        });
    }

    pub(crate) fn push_boxed_text(
        &mut self,
        at: DVec2,
        content: impl Into<String>,
        size: u32,
        color: Rgb,
        boxed: TextBox,
    ) {
        self.primitives.push(Primitive::Text {
            at,
            content: content.into(),
            size,
            color,
            boxed: Some(boxed),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::layout::LayoutEngine;
    use crate::types::Bounds;

    fn test_figure() -> Figure {
        let config = RenderConfig::default();
        let layout = LayoutEngine::new(&config)
            .build((400, 300), Bounds::new((0.0, 1.0), (0.0, 1.0)), None)
            .unwrap();
        Figure::new(layout)
    }

    #[test]
    fn figure_starts_empty() {
        let fig = test_figure();
        assert_eq!(fig.primitive_count(), 0);
        assert!(fig.title().is_none());
        assert!(fig.legend().is_empty());
    }

    #[test]
    fn primitives_keep_insertion_order() {
        let mut fig = test_figure();
        fig.push_polygon(vec![DVec2::ZERO, DVec2::X, DVec2::Y], Rgb::WHITE);
        fig.push_line(vec![DVec2::ZERO, DVec2::X], Rgb::BLACK, 1, false);
        fig.push_marker(DVec2::ZERO, Rgb::BLACK, 3, Rgb::WHITE);
        let kinds: Vec<_> = fig
            .primitives()
            .iter()
            .map(|p| match p {
                Primitive::Polygon { .. } => "polygon",
                Primitive::Line { .. } => "line",
                Primitive::Marker { .. } => "marker",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["polygon", "line", "marker"]);
    }

    #[test]
    fn title_and_legend_accumulate() {
        let mut fig = test_figure();
        fig.set_title("Polar Region");
        fig.push_legend("r = 2", Rgb::BLACK);
        assert_eq!(fig.title(), Some("Polar Region"));
        assert_eq!(fig.legend().len(), 1);
    }
}
