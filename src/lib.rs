//! mathfig - figure templates for instructional mathematics diagrams.
//!
//! The crate standardizes the repetitive parts of textbook figure generation:
//! named color schemes, bilingual labels, coordinate-system transforms,
//! canonical layout, slot-based annotation placement, region fills, and PNG
//! persistence. Callers supply per-example geometry (boundary functions,
//! key points, captions); the template does the rest.
//!
//! ```no_run
//! use glam::DVec2;
//! use mathfig::{Bounds, Plotter, RenderConfig, SlotName};
//!
//! fn main() -> mathfig::Result<()> {
//!     let plotter = Plotter::new("academic", "en", RenderConfig::default())?;
//!     let mut figure = plotter.figure(Bounds::new((-2.0, 2.0), (-2.0, 2.0)))?;
//!
//!     let disk = mathfig::Region::parametric((0.0, std::f64::consts::TAU), |t| {
//!         DVec2::new(2.0 * t.cos(), 2.0 * t.sin())
//!     })
//!     .with_label("r = 2");
//!     plotter.regions().fill(&mut figure, &disk);
//!
//!     let slot = figure.slots_mut().take(SlotName::RightSpace)?;
//!     plotter
//!         .annotations()
//!         .add_point(&mut figure, DVec2::new(2.0, 0.0), "(2, 0)", slot);
//!
//!     plotter.save(figure, "polar_disk", "assets".as_ref())?;
//!     Ok(())
//! }
//! ```

pub mod annotate;
pub mod config;
pub mod coords;
pub mod errors;
pub mod layout;
pub mod log;
pub mod persist;
pub mod region;
pub mod render;
pub mod slots;
pub mod style;
pub mod text;
pub mod types;

use std::path::{Path, PathBuf};

pub use annotate::AnnotationPlacer;
pub use config::RenderConfig;
pub use coords::{Cartesian, CoordSystem, CoordinateSystem, Cylindrical, Polar, Spherical};
pub use errors::{ConfigError, FigureError, LayoutError, PersistError, RenderError, Result};
pub use layout::{Layout, LayoutEngine};
pub use persist::FigurePersistence;
pub use region::{BoundarySpec, Region, RegionRenderer};
pub use render::Figure;
pub use slots::{PositionSlot, PositionSlotAllocator, SlotName};
pub use style::{ColorKey, ColorScheme, ColorSchemeRegistry};
pub use text::{Language, TextCategory, TextLibrary};
pub use types::{Bounds, Rgb};

/// One-stop figure pipeline: style, language, and configuration resolved once
/// at construction, then reused for every figure of a batch run.
///
/// Configuration errors (unknown style, unsupported language) surface here,
/// before any drawing begins.
#[derive(Debug)]
pub struct Plotter {
    scheme: ColorScheme,
    texts: TextLibrary,
    config: RenderConfig,
}

impl Plotter {
    pub fn new(style_id: &str, language_code: &str, config: RenderConfig) -> Result<Self> {
        let registry = ColorSchemeRegistry::new();
        let scheme = registry.get_scheme(style_id)?.clone();
        let language = Language::from_code(language_code)?;
        Ok(Plotter {
            scheme,
            texts: TextLibrary::new(language),
            config,
        })
    }

    /// Build a plotter against an already-populated registry, for callers
    /// that register custom styles.
    pub fn with_registry(
        registry: &ColorSchemeRegistry,
        style_id: &str,
        language: Language,
        config: RenderConfig,
    ) -> Result<Self> {
        let scheme = registry.get_scheme(style_id)?.clone();
        Ok(Plotter {
            scheme,
            texts: TextLibrary::new(language),
            config,
        })
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Localized label lookup.
    pub fn get_text(&self, category: TextCategory, key: &str) -> String {
        self.texts.get_text(category, key)
    }

    /// Start a figure over `domain_bounds` with the default layout policy:
    /// configured figure size and margin ratio, origin marker when the origin
    /// is in view, and localized axis captions.
    pub fn figure(&self, domain_bounds: Bounds) -> Result<Figure> {
        let engine = LayoutEngine::new(&self.config);
        let layout = engine.build_default(domain_bounds)?;
        let mut figure = Figure::new(layout).with_chrome(
            self.scheme.color(ColorKey::LightGray),
            self.scheme.color(ColorKey::DarkGray),
        );
        figure.set_axis_labels(
            self.get_text(TextCategory::Common, "x_axis"),
            self.get_text(TextCategory::Common, "y_axis"),
        );
        engine.draw_origin_marker(&mut figure);
        Ok(figure)
    }

    pub fn regions(&self) -> RegionRenderer<'_> {
        RegionRenderer::new(&self.scheme, &self.config)
    }

    pub fn annotations(&self) -> AnnotationPlacer<'_> {
        AnnotationPlacer::new(&self.scheme, &self.config)
    }

    /// Persist the figure as `{directory}/{name}.png` and release it.
    pub fn save(&self, figure: Figure, name: &str, directory: &Path) -> Result<PathBuf> {
        FigurePersistence::new(&self.config).save(figure, name, directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plotter_rejects_unknown_style() {
        let err = Plotter::new("baroque", "en", RenderConfig::default()).unwrap_err();
        assert!(matches!(err, FigureError::Config(ConfigError::UnknownStyle { .. })));
    }

    #[test]
    fn plotter_rejects_unknown_language() {
        let err = Plotter::new("academic", "de", RenderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            FigureError::Config(ConfigError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn figure_carries_localized_axis_captions() {
        let plotter = Plotter::new("academic", "en", RenderConfig::default()).unwrap();
        let figure = plotter.figure(Bounds::new((-1.0, 1.0), (-1.0, 1.0))).unwrap();
        // Origin in view: the origin marker primitives are already present.
        assert!(figure.primitive_count() > 0);
        assert!(figure.layout().origin_visible);
    }

    #[test]
    fn custom_registry_styles_flow_through() {
        let mut registry = ColorSchemeRegistry::new();
        let entries: Vec<_> = ColorKey::ALL.iter().map(|&k| (k, Rgb::new(9, 9, 9))).collect();
        registry
            .register("mono", ColorScheme::from_entries("mono", &entries).unwrap())
            .unwrap();
        let plotter =
            Plotter::with_registry(&registry, "mono", Language::En, RenderConfig::default())
                .unwrap();
        assert_eq!(plotter.scheme().color(ColorKey::Primary), Rgb::new(9, 9, 9));
    }
}
