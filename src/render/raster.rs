//! Rasterize a figure scene into an RGB pixel buffer.
//!
//! The plotters bitmap backend draws into an owned buffer that lives only for
//! the duration of [`rasterize`]; encoding and file output happen elsewhere.
//! Everything geometric (fills, curves, markers, arrows) draws
//! unconditionally; text is best-effort and a font failure downgrades to a
//! one-time warning so labels never block rendering.

use std::sync::Once;

use glam::DVec2;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, register_font};

use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::layout::Layout;
use crate::log::warn;
use crate::render::{Figure, Primitive};
use crate::types::Rgb;

/// Smallest canvas that still leaves a plot area inside the margins.
const MIN_CANVAS_PX: u32 = 220;

const TICK_FONTSIZE: u32 = 18;
const LEGEND_FONTSIZE: u32 = 18;
const DASH_ON_PX: f64 = 12.0;
const DASH_OFF_PX: f64 = 8.0;
const ARROW_HEAD_LEN_PX: f64 = 12.0;
const ARROW_HEAD_HALF_W_PX: f64 = 5.0;

static FONT_INIT: Once = Once::new();

fn to_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// RGB buffer length for a canvas. Widened before multiplying: the pixel
/// count of a large canvas can exceed u32 range.
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend {
        message: e.to_string(),
    }
}

/// Register the configured font with the ab_glyph backend, once per process.
fn ensure_font(config: &RenderConfig) {
    if let Some(data) = config.font_data {
        let family = config.font_family;
        FONT_INIT.call_once(|| {
            if register_font(family, FontStyle::Normal, data).is_err() {
                warn!(family, "embedded font data is not a valid font");
            }
        });
    }
}

/// Render the figure into an RGB buffer of `figsize_px` dimensions.
pub fn rasterize(figure: &Figure, config: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let (width, height) = figure.layout().figsize_px;
    if width < MIN_CANVAS_PX || height < MIN_CANVAS_PX {
        return Err(RenderError::FigureTooSmall { width, height });
    }
    ensure_font(config);

    let mut buffer = vec![0u8; buffer_len(width, height)];
    let mut text_failed = false;
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&to_color(config.background)).map_err(backend_err)?;

        draw_grid_and_axes(&root, figure, config, &mut text_failed)?;
        for primitive in figure.primitives() {
            draw_primitive(&root, figure.layout(), primitive, config, &mut text_failed)?;
        }
        draw_title(&root, figure, config, &mut text_failed)?;
        draw_legend(&root, figure, config, &mut text_failed)?;

        root.present().map_err(backend_err)?;
    }
    if text_failed {
        warn!("no usable font; figure text was skipped");
    }
    Ok(buffer)
}

/// Draw a text element, swallowing font failures.
fn draw_text(
    root: &DrawingArea<BitMapBackend, Shift>,
    content: &str,
    pos_px: (i32, i32),
    size: u32,
    color: Rgb,
    anchor: Pos,
    config_family: &str,
    text_failed: &mut bool,
) {
    let fill = to_color(color);
    let style = TextStyle::from((config_family, size as f64).into_font())
        .color(&fill)
        .pos(anchor);
    if root.draw(&Text::new(content.to_string(), pos_px, style)).is_err() {
        *text_failed = true;
    }
}

/// Rough text extent without font metrics, good enough for callout boxes.
fn estimate_text_width(content: &str, size: u32) -> i32 {
    (content.chars().count() as f64 * size as f64 * 0.58).ceil() as i32
}

fn draw_grid_and_axes(
    root: &DrawingArea<BitMapBackend, Shift>,
    figure: &Figure,
    config: &RenderConfig,
    text_failed: &mut bool,
) -> Result<(), RenderError> {
    let layout = figure.layout();
    let (left, top, right, bottom) = layout.plot_area();
    let grid = to_color(figure.grid_color());
    let axis = figure.axis_color();

    // Grid lines with tick labels along the bottom and left edges.
    let (x0, x1) = layout.xlim();
    for tick in nice_ticks(x0, x1) {
        let (px, _) = layout.to_px(DVec2::new(tick, layout.ylim().0));
        root.draw(&PathElement::new(
            vec![(px, top), (px, bottom)],
            grid.stroke_width(config.axis_width.max(1)),
        ))
        .map_err(backend_err)?;
        draw_text(
            root,
            &format_tick(tick),
            (px, bottom + 8),
            TICK_FONTSIZE,
            axis,
            Pos::new(HPos::Center, VPos::Top),
            config.font_family,
            text_failed,
        );
    }
    let (y0, y1) = layout.ylim();
    for tick in nice_ticks(y0, y1) {
        let (_, py) = layout.to_px(DVec2::new(x0, tick));
        root.draw(&PathElement::new(
            vec![(left, py), (right, py)],
            grid.stroke_width(config.axis_width.max(1)),
        ))
        .map_err(backend_err)?;
        draw_text(
            root,
            &format_tick(tick),
            (left - 8, py),
            TICK_FONTSIZE,
            axis,
            Pos::new(HPos::Right, VPos::Center),
            config.font_family,
            text_failed,
        );
    }

    // Plot area frame.
    root.draw(&Rectangle::new(
        [(left, top), (right, bottom)],
        grid.stroke_width(config.axis_width.max(1)),
    ))
    .map_err(backend_err)?;

    // Axis captions.
    let (xl, yl) = figure.axis_labels();
    draw_text(
        root,
        xl,
        ((left + right) / 2, bottom + 40),
        layout.axis_fontsize,
        axis,
        Pos::new(HPos::Center, VPos::Top),
        config.font_family,
        text_failed,
    );
    draw_text(
        root,
        yl,
        (left - 50, (top + bottom) / 2),
        layout.axis_fontsize,
        axis,
        Pos::new(HPos::Center, VPos::Center),
        config.font_family,
        text_failed,
    );
    Ok(())
}

fn draw_primitive(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &Layout,
    primitive: &Primitive,
    config: &RenderConfig,
    text_failed: &mut bool,
) -> Result<(), RenderError> {
    match primitive {
        Primitive::Line {
            points,
            color,
            width,
            dashed,
        } => {
            let px: Vec<(i32, i32)> = points.iter().map(|&p| layout.to_px(p)).collect();
            let style = to_color(*color).stroke_width(*width);
            if *dashed {
                for segment in dash_polyline(&px) {
                    root.draw(&PathElement::new(segment, style)).map_err(backend_err)?;
                }
            } else {
                root.draw(&PathElement::new(px, style)).map_err(backend_err)?;
            }
        }
        Primitive::Polygon { points, fill } => {
            let px: Vec<(i32, i32)> = points.iter().map(|&p| layout.to_px(p)).collect();
            root.draw(&Polygon::new(px, to_color(*fill).filled()))
                .map_err(backend_err)?;
        }
        Primitive::Marker {
            at,
            color,
            radius,
            edge,
        } => {
            let center = layout.to_px(*at);
            root.draw(&Circle::new(center, *radius + 2, to_color(*edge).filled()))
                .map_err(backend_err)?;
            root.draw(&Circle::new(center, *radius, to_color(*color).filled()))
                .map_err(backend_err)?;
        }
        Primitive::Arrow {
            from,
            to,
            color,
            width,
        } => {
            draw_arrow(root, layout, *from, *to, *color, *width)?;
        }
        Primitive::Text {
            at,
            content,
            size,
            color,
            boxed,
        } => {
            let anchor_px = layout.to_px(*at);
            if let Some(text_box) = boxed {
                let text_w = estimate_text_width(content, *size);
                let pad = (*size as i32) / 2;
                let half_h = (*size as i32) / 2 + pad;
                let rect = [
                    (anchor_px.0 - pad, anchor_px.1 - half_h),
                    (anchor_px.0 + text_w + pad, anchor_px.1 + half_h),
                ];
                root.draw(&Rectangle::new(rect, to_color(text_box.face).filled()))
                    .map_err(backend_err)?;
                root.draw(&Rectangle::new(rect, to_color(text_box.edge).stroke_width(1)))
                    .map_err(backend_err)?;
            }
            draw_text(
                root,
                content,
                anchor_px,
                *size,
                *color,
                Pos::new(HPos::Left, VPos::Center),
                config.font_family,
                text_failed,
            );
        }
    }
    Ok(())
}

fn draw_arrow(
    root: &DrawingArea<BitMapBackend, Shift>,
    layout: &Layout,
    from: DVec2,
    to: DVec2,
    color: Rgb,
    width: u32,
) -> Result<(), RenderError> {
    let a = layout.to_px(from);
    let b = layout.to_px(to);
    let dir = DVec2::new((b.0 - a.0) as f64, (b.1 - a.1) as f64);
    let len = dir.length();
    if len < 1.0 {
        return Ok(());
    }
    let unit = dir / len;
    // Shaft stops at the head base.
    let base = DVec2::new(b.0 as f64, b.1 as f64) - unit * ARROW_HEAD_LEN_PX;
    let normal = DVec2::new(-unit.y, unit.x) * ARROW_HEAD_HALF_W_PX;
    let style = to_color(color);
    root.draw(&PathElement::new(
        vec![a, (base.x.round() as i32, base.y.round() as i32)],
        style.stroke_width(width),
    ))
    .map_err(backend_err)?;
    let head = vec![
        b,
        ((base + normal).x.round() as i32, (base + normal).y.round() as i32),
        ((base - normal).x.round() as i32, (base - normal).y.round() as i32),
    ];
    root.draw(&Polygon::new(head, style.filled()))
        .map_err(backend_err)?;
    Ok(())
}

fn draw_title(
    root: &DrawingArea<BitMapBackend, Shift>,
    figure: &Figure,
    config: &RenderConfig,
    text_failed: &mut bool,
) -> Result<(), RenderError> {
    let Some(title) = figure.title() else {
        return Ok(());
    };
    let layout = figure.layout();
    let (width, _) = layout.figsize_px;
    let (_, top, _, _) = layout.plot_area();
    draw_text(
        root,
        title,
        ((width / 2) as i32, top / 2),
        layout.title_fontsize,
        figure.axis_color(),
        Pos::new(HPos::Center, VPos::Center),
        config.font_family,
        text_failed,
    );
    Ok(())
}

/// Legend box fixed at the upper-right of the plot area.
fn draw_legend(
    root: &DrawingArea<BitMapBackend, Shift>,
    figure: &Figure,
    config: &RenderConfig,
    text_failed: &mut bool,
) -> Result<(), RenderError> {
    let entries = figure.legend();
    if entries.is_empty() {
        return Ok(());
    }
    let layout = figure.layout();
    let (_, top, right, _) = layout.plot_area();

    let row_h = LEGEND_FONTSIZE as i32 + 10;
    let text_w = entries
        .iter()
        .map(|e| estimate_text_width(&e.label, LEGEND_FONTSIZE))
        .max()
        .unwrap_or(0);
    let swatch_w = 28;
    let pad = 10;
    let box_w = swatch_w + 8 + text_w + pad * 2;
    let box_h = row_h * entries.len() as i32 + pad * 2;
    let (bx1, by0) = (right - 10, top + 10);
    let bx0 = bx1 - box_w;
    let by1 = by0 + box_h;

    root.draw(&Rectangle::new([(bx0, by0), (bx1, by1)], WHITE.filled()))
        .map_err(backend_err)?;
    root.draw(&Rectangle::new(
        [(bx0, by0), (bx1, by1)],
        to_color(figure.grid_color()).stroke_width(1),
    ))
    .map_err(backend_err)?;

    for (i, entry) in entries.iter().enumerate() {
        let cy = by0 + pad + row_h * i as i32 + row_h / 2;
        root.draw(&PathElement::new(
            vec![(bx0 + pad, cy), (bx0 + pad + swatch_w, cy)],
            to_color(entry.color).stroke_width(3),
        ))
        .map_err(backend_err)?;
        draw_text(
            root,
            &entry.label,
            (bx0 + pad + swatch_w + 8, cy),
            LEGEND_FONTSIZE,
            figure.axis_color(),
            Pos::new(HPos::Left, VPos::Center),
            config.font_family,
            text_failed,
        );
    }
    Ok(())
}

/// Split a pixel polyline into dash segments.
fn dash_polyline(points: &[(i32, i32)]) -> Vec<Vec<(i32, i32)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(i32, i32)> = Vec::new();
    let mut drawing = true;
    let mut remaining = DASH_ON_PX;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let start = DVec2::new(a.0 as f64, a.1 as f64);
        let end = DVec2::new(b.0 as f64, b.1 as f64);
        let seg = end - start;
        let seg_len = seg.length();
        if seg_len == 0.0 {
            continue;
        }
        let unit = seg / seg_len;
        let mut travelled = 0.0;
        let mut cursor = start;
        if drawing && current.is_empty() {
            current.push(a);
        }
        while travelled + remaining < seg_len {
            cursor += unit * remaining;
            travelled += remaining;
            let point = (cursor.x.round() as i32, cursor.y.round() as i32);
            if drawing {
                current.push(point);
                segments.push(std::mem::take(&mut current));
                remaining = DASH_OFF_PX;
            } else {
                current.push(point);
                remaining = DASH_ON_PX;
            }
            drawing = !drawing;
            if !drawing {
                current.clear();
            }
        }
        // Clamp so the next segment always makes forward progress even when
        // a dash boundary lands exactly on a vertex.
        remaining = (remaining - (seg_len - travelled)).max(0.5);
        if drawing {
            current.push(b);
        }
    }
    if drawing && current.len() > 1 {
        segments.push(current);
    }
    segments
}

/// Tick positions aiming for about six intervals with a 1-2-5 step.
fn nice_ticks(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span.is_finite()) || span <= 0.0 {
        return Vec::new();
    }
    let raw = span / 6.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let step = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    } * magnitude;

    let mut ticks = Vec::new();
    let mut tick = (min / step).ceil() * step;
    while tick <= max + step * 1e-9 {
        // Snap values like -0.0000000001 to zero for clean labels.
        ticks.push(if tick.abs() < step * 1e-9 { 0.0 } else { tick });
        tick += step;
    }
    ticks
}

fn format_tick(value: f64) -> String {
    if value == value.trunc() {
        format!("{}", value as i64)
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::types::Bounds;

    fn test_figure(figsize: (u32, u32)) -> Figure {
        let config = RenderConfig::default();
        let layout = LayoutEngine::new(&config)
            .build(figsize, Bounds::new((-2.0, 2.0), (-2.0, 2.0)), None)
            .unwrap();
        Figure::new(layout)
    }

    #[test]
    fn rasterize_produces_full_buffer() {
        let config = RenderConfig::default();
        let fig = test_figure((400, 300));
        let buf = rasterize(&fig, &config).unwrap();
        assert_eq!(buf.len(), 400 * 300 * 3);
    }

    #[test]
    fn rasterize_fills_background_white() {
        let config = RenderConfig::default();
        let fig = test_figure((400, 300));
        let buf = rasterize(&fig, &config).unwrap();
        // Corner pixel is outside every margin and grid line.
        assert_eq!(&buf[0..3], &[255, 255, 255]);
    }

    #[test]
    fn rasterize_rejects_tiny_canvas() {
        let config = RenderConfig::default();
        let fig = test_figure((50, 50));
        let err = rasterize(&fig, &config).unwrap_err();
        assert!(matches!(err, RenderError::FigureTooSmall { .. }));
    }

    #[test]
    fn polygon_fill_changes_pixels() {
        let config = RenderConfig::default();
        let mut fig = test_figure((400, 300));
        let empty = rasterize(&fig, &config).unwrap();
        fig.push_polygon(
            vec![
                DVec2::new(-1.0, -1.0),
                DVec2::new(1.0, -1.0),
                DVec2::new(1.0, 1.0),
                DVec2::new(-1.0, 1.0),
            ],
            Rgb::new(0xAE, 0xD6, 0xF1),
        );
        let filled = rasterize(&fig, &config).unwrap();
        assert_ne!(empty, filled);
    }

    #[test]
    fn buffer_len_survives_large_canvases() {
        // 46341^2 overflows a u32 pixel count; the byte length must not.
        let side = 46_341u32;
        assert_eq!(buffer_len(side, side), side as usize * side as usize * 3);
        assert_eq!(buffer_len(400, 300), 400 * 300 * 3);
    }

    #[test]
    fn nice_ticks_cover_symmetric_range() {
        let ticks = nice_ticks(-2.5, 2.5);
        assert!(ticks.contains(&0.0));
        assert!(ticks.first().unwrap() >= &-2.5);
        assert!(ticks.last().unwrap() <= &2.5);
    }

    #[test]
    fn nice_ticks_empty_for_degenerate_range() {
        assert!(nice_ticks(1.0, 1.0).is_empty());
        assert!(nice_ticks(f64::NAN, 2.0).is_empty());
    }

    #[test]
    fn dash_polyline_alternates() {
        let segments = dash_polyline(&[(0, 0), (100, 0)]);
        assert!(segments.len() >= 4);
        for segment in &segments {
            assert!(segment.len() >= 2);
        }
    }

    #[test]
    fn format_tick_trims_zeros() {
        assert_eq!(format_tick(2.0), "2");
        assert_eq!(format_tick(-0.5), "-0.5");
        assert_eq!(format_tick(0.25), "0.25");
    }
}
