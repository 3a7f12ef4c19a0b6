//! Chart renderer: background, grid, axis labels and the active chart type.
//!
//! Only [`ChartType::Line`] draws all three series. Bar, area and scatter draw the
//! primary series alone.

use crate::error::Result;
use crate::geometry::{Geometry, Point};
use crate::models::{ChartConfig, ChartType};
use crate::palette::{self, Color, Palette};
use crate::series::SeriesStore;
use crate::smoothing::smooth;
use crate::surface::Surface;

pub const LINE_WIDTH: u32 = 5;
pub const AREA_OUTLINE_WIDTH: u32 = 3;
pub const AREA_FILL_OPACITY: f64 = 0.3;
pub const GRID_LINE_WIDTH: u32 = 1;
pub const SCATTER_RADIUS: f64 = 4.0;
pub const LABEL_FONT_PX: u32 = 12;

/// Draw one full frame, resolving the palette from `config.theme`.
pub fn render<S>(
    surface: &mut S,
    store: &SeriesStore,
    config: &ChartConfig,
    geometry: &Geometry,
) -> Result<()>
where
    S: Surface + ?Sized,
{
    let palette = palette::resolve(config.theme);
    render_with_palette(surface, store, config, geometry, &palette)
}

/// Draw one full frame with an explicit palette.
pub fn render_with_palette<S>(
    surface: &mut S,
    store: &SeriesStore,
    config: &ChartConfig,
    geometry: &Geometry,
    palette: &Palette,
) -> Result<()>
where
    S: Surface + ?Sized,
{
    surface.fill(palette.bg)?;
    if config.show_grid {
        draw_grid(surface, geometry, palette.grid)?;
    }
    draw_labels(surface, geometry, palette.text)?;

    if store.is_empty() {
        return Ok(());
    }

    match config.chart_type {
        ChartType::Line => {
            for (window, color) in store.windows().iter().zip(palette.series()) {
                draw_line(surface, geometry, window, color)?;
            }
        }
        ChartType::Bar => draw_bars(surface, geometry, &store.primary(), palette.line1)?,
        ChartType::Area => draw_area(surface, geometry, &store.primary(), palette.line1)?,
        ChartType::Scatter => draw_scatter(surface, geometry, &store.primary(), palette.line1)?,
    }
    Ok(())
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, g: &Geometry, color: Color) -> Result<()> {
    let (w, h) = (g.width as f64, g.height as f64);
    for x in g.vertical_grid_xs() {
        let x = x as f64;
        surface.stroke_path(&[(x, 0.0), (x, h)], color, GRID_LINE_WIDTH)?;
    }
    for y in g.horizontal_grid_ys() {
        let y = y as f64;
        surface.stroke_path(&[(0.0, y), (w, y)], color, GRID_LINE_WIDTH)?;
    }
    Ok(())
}

fn draw_labels<S: Surface + ?Sized>(surface: &mut S, g: &Geometry, color: Color) -> Result<()> {
    for label in g.vertical_labels().iter().chain(g.horizontal_labels().iter()) {
        surface.text(&label.text, label.at, LABEL_FONT_PX, color)?;
    }
    Ok(())
}

/// Pixel positions of the smoothed window.
fn smoothed_points(g: &Geometry, window: &[u32]) -> Vec<Point> {
    smooth(window)
        .into_iter()
        .enumerate()
        .map(|(i, v)| g.to_pixel(i, v))
        .collect()
}

fn draw_line<S: Surface + ?Sized>(
    surface: &mut S,
    g: &Geometry,
    window: &[u32],
    color: Color,
) -> Result<()> {
    surface.stroke_path(&smoothed_points(g, window), color, LINE_WIDTH)
}

fn draw_bars<S: Surface + ?Sized>(
    surface: &mut S,
    g: &Geometry,
    window: &[u32],
    color: Color,
) -> Result<()> {
    let bar_width = g.value_increment.saturating_sub(2) as f64;
    for (i, v) in window.iter().enumerate() {
        let (x, top) = g.to_pixel(i, *v as f64);
        surface.fill_rect((x + 1.0, top), (bar_width, *v as f64), color)?;
    }
    Ok(())
}

fn draw_area<S: Surface + ?Sized>(
    surface: &mut S,
    g: &Geometry,
    window: &[u32],
    color: Color,
) -> Result<()> {
    let (w, h) = (g.width as f64, g.height as f64);
    let mut outline = smoothed_points(g, window);
    outline.push((w, h));
    outline.push((0.0, h));
    surface.fill_polygon(&outline, color.with_alpha(AREA_FILL_OPACITY))?;
    // Close the stroke back onto the first sample.
    if let Some(first) = outline.first().copied() {
        outline.push(first);
    }
    surface.stroke_path(&outline, color, AREA_OUTLINE_WIDTH)
}

fn draw_scatter<S: Surface + ?Sized>(
    surface: &mut S,
    g: &Geometry,
    window: &[u32],
    color: Color,
) -> Result<()> {
    for (i, v) in window.iter().enumerate() {
        surface.fill_circle(g.to_pixel(i, *v as f64), SCATTER_RADIUS, color)?;
    }
    Ok(())
}
