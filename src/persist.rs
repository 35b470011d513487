//! Write finished figures to disk.
//!
//! Output is an 8-bit RGB PNG with a pHYs chunk carrying the configured DPI
//! and a white (configurable) background. The output directory is created
//! recursively; a creation race with another process is tolerated. Saving the
//! same name twice overwrites, so batch reruns are idempotent.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::errors::{FigureError, PersistError};
use crate::log::debug;
use crate::render::raster::rasterize;
use crate::render::Figure;

/// Pixels-per-meter for a given DPI (PNG pHYs stores metric density).
fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / 0.0254).round() as u32
}

/// Saves figures under one rendering configuration.
#[derive(Clone, Debug)]
pub struct FigurePersistence<'a> {
    config: &'a RenderConfig,
}

impl<'a> FigurePersistence<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        FigurePersistence { config }
    }

    /// Rasterize `figure` and write `{directory}/{name}.png`.
    ///
    /// Consumes the figure: the scene and its rasterization buffer are
    /// released before the next figure is built, even on error.
    pub fn save(
        &self,
        figure: Figure,
        name: &str,
        directory: &Path,
    ) -> Result<PathBuf, FigureError> {
        let path = directory.join(format!("{name}.png"));

        // Redundant when the directory exists; never fatal unless the
        // filesystem genuinely refuses.
        if let Err(source) = fs::create_dir_all(directory) {
            return Err(PersistError::IoWrite {
                path: directory.to_path_buf(),
                source,
            }
            .into());
        }

        let (width, height) = figure.layout().figsize_px;
        let buffer = rasterize(&figure, self.config)?;
        drop(figure);

        let file = File::create(&path).map_err(|source| PersistError::IoWrite {
            path: path.clone(),
            source,
        })?;
        self.encode(BufWriter::new(file), &buffer, width, height)
            .map_err(|source| PersistError::Encode {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "figure saved");
        Ok(path)
    }

    fn encode<W: std::io::Write>(
        &self,
        writer: W,
        rgb: &[u8],
        width: u32,
        height: u32,
    ) -> Result<(), png::EncodingError> {
        let ppm = dpi_to_ppm(self.config.dpi);
        let mut encoder = png::Encoder::new(writer, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgb)?;
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::types::Bounds;

    fn test_figure(config: &RenderConfig) -> Figure {
        let layout = LayoutEngine::new(config)
            .build((400, 300), Bounds::new((-2.0, 2.0), (-2.0, 2.0)), None)
            .unwrap();
        Figure::new(layout)
    }

    #[test]
    fn save_writes_nonzero_png() {
        let config = RenderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let persistence = FigurePersistence::new(&config);

        let path = persistence
            .save(test_figure(&config), "blank", dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("blank.png"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn save_creates_missing_directories() {
        let config = RenderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("assets").join("ch7");
        let persistence = FigurePersistence::new(&config);

        let path = persistence
            .save(test_figure(&config), "fig", &nested)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_twice_overwrites_without_error() {
        let config = RenderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let persistence = FigurePersistence::new(&config);

        let first = persistence
            .save(test_figure(&config), "again", dir.path())
            .unwrap();
        let second = persistence
            .save(test_figure(&config), "again", dir.path())
            .unwrap();
        assert_eq!(first, second);
        assert!(second.exists());
    }

    #[test]
    fn saved_png_carries_dpi_metadata() {
        let config = RenderConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let persistence = FigurePersistence::new(&config);
        let path = persistence
            .save(test_figure(&config), "dpi", dir.path())
            .unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let dims = reader.info().pixel_dims.expect("pHYs chunk present");
        assert_eq!(dims.unit, png::Unit::Meter);
        // 300 DPI is 11811 pixels per meter.
        assert!(dims.xppu >= dpi_to_ppm(300));
        assert_eq!(dims.xppu, dims.yppu);
    }

    #[test]
    fn dpi_conversion_matches_png_convention() {
        assert_eq!(dpi_to_ppm(300), 11811);
        assert_eq!(dpi_to_ppm(72), 2835);
    }
}
