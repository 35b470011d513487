//! Key points, arrows, and formula callouts.
//!
//! Labels go into pre-declared slots (see [`crate::slots`]); each call pushes
//! an independent group of primitives and nothing here carries state between
//! calls. Text drawing is best-effort at rasterization time, so a missing
//! font can never block a figure.

use glam::DVec2;

use crate::config::RenderConfig;
use crate::render::{Figure, TextBox};
use crate::slots::PositionSlot;
use crate::style::{ColorKey, ColorScheme};
use crate::types::Rgb;

const POINT_LABEL_FONTSIZE: u32 = 18;
const FORMULA_FONTSIZE: u32 = 20;

/// Places annotations against one color scheme.
pub struct AnnotationPlacer<'a> {
    scheme: &'a ColorScheme,
    config: &'a RenderConfig,
}

impl<'a> AnnotationPlacer<'a> {
    pub fn new(scheme: &'a ColorScheme, config: &'a RenderConfig) -> Self {
        AnnotationPlacer { scheme, config }
    }

    /// Mark `point` and label it from `slot`: a white-edged dot, a boxed
    /// label at the slot anchor, and an arrow from the box to the dot.
    pub fn add_point(&self, figure: &mut Figure, point: DVec2, label: &str, slot: PositionSlot) {
        let marker_color = self.scheme.color(ColorKey::DarkGray);
        figure.push_marker(point, marker_color, 6, Rgb::WHITE);
        figure.push_arrow(
            slot.anchor,
            point,
            self.scheme.color(ColorKey::LightGray),
            self.config.axis_width.max(1),
        );
        figure.push_boxed_text(
            slot.anchor,
            label,
            POINT_LABEL_FONTSIZE,
            marker_color,
            TextBox {
                face: Rgb::WHITE,
                edge: self.scheme.color(ColorKey::LightGray),
            },
        );
    }

    /// Boxed formula text at `slot`, no marker or arrow.
    pub fn add_formula(&self, figure: &mut Figure, text: &str, slot: PositionSlot) {
        figure.push_boxed_text(
            slot.anchor,
            text,
            FORMULA_FONTSIZE,
            self.scheme.color(ColorKey::DarkGray),
            TextBox {
                face: Rgb::WHITE,
                edge: self.scheme.color(ColorKey::Primary),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::layout::LayoutEngine;
    use crate::render::Primitive;
    use crate::slots::SlotName;
    use crate::style::ColorSchemeRegistry;
    use crate::types::Bounds;

    fn figure(config: &RenderConfig) -> Figure {
        let layout = LayoutEngine::new(config)
            .build((800, 600), Bounds::new((-2.0, 2.0), (-2.0, 2.0)), None)
            .unwrap();
        Figure::new(layout)
    }

    #[test]
    fn add_point_pushes_marker_arrow_and_box() {
        let registry = ColorSchemeRegistry::new();
        let config = RenderConfig::default();
        let scheme = registry.get_scheme("academic").unwrap();
        let placer = AnnotationPlacer::new(scheme, &config);

        let mut fig = figure(&config);
        let slot = fig.slots_mut().take(SlotName::LeftBottom).unwrap();
        placer.add_point(&mut fig, DVec2::new(0.0, 0.0), "(0, 0)", slot);

        assert_eq!(fig.primitive_count(), 3);
        assert!(matches!(fig.primitives()[0], Primitive::Marker { .. }));
        assert!(matches!(fig.primitives()[1], Primitive::Arrow { .. }));
        match &fig.primitives()[2] {
            Primitive::Text { content, boxed, .. } => {
                assert_eq!(content, "(0, 0)");
                assert!(boxed.is_some());
            }
            other => panic!("expected boxed text, got {other:?}"),
        }
    }

    #[test]
    fn add_formula_is_box_only() {
        let registry = ColorSchemeRegistry::new();
        let config = RenderConfig::default();
        let scheme = registry.get_scheme("academic").unwrap();
        let placer = AnnotationPlacer::new(scheme, &config);

        let mut fig = figure(&config);
        let slot = fig.slots_mut().take(SlotName::LeftTop).unwrap();
        placer.add_formula(&mut fig, "dA = r dr dθ", slot);

        assert_eq!(fig.primitive_count(), 1);
        assert!(matches!(fig.primitives()[0], Primitive::Text { .. }));
    }

    #[test]
    fn arrow_points_from_slot_to_marker() {
        let registry = ColorSchemeRegistry::new();
        let config = RenderConfig::default();
        let scheme = registry.get_scheme("academic").unwrap();
        let placer = AnnotationPlacer::new(scheme, &config);

        let mut fig = figure(&config);
        let slot = fig.slots_mut().take(SlotName::RightSpace).unwrap();
        let target = DVec2::new(1.5, -0.5);
        placer.add_point(&mut fig, target, "P", slot);

        match fig.primitives()[1] {
            Primitive::Arrow { from, to, .. } => {
                assert_eq!(from, slot.anchor);
                assert_eq!(to, target);
            }
            ref other => panic!("expected arrow, got {other:?}"),
        }
    }
}
