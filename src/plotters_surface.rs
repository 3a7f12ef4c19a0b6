//! [`Surface`] implementation on top of any plotters backend, plus image export.
//!
//! The bitmap backend renders text through `ab_glyph`, which does not discover OS
//! fonts, so a font file has to be registered first. Without one, bitmap output
//! is drawn without axis labels. SVG output writes `<text>` elements and always
//! carries its labels.

use crate::error::{ChartError, Result};
use crate::geometry::{Geometry, Point};
use crate::models::ChartConfig;
use crate::palette::Color;
use crate::render::render;
use crate::series::SeriesStore;
use crate::surface::Surface;
use anyhow::{Context, bail};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontStyle, IntoFont, RGBAColor, ShapeStyle};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Family name the bitmap text path registers its font under.
const FONT_FAMILY: &str = "sans-serif";

/// Well-known locations of a sans-serif TTF on common systems.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static FONT_READY: OnceLock<bool> = OnceLock::new();

/// Register a font for bitmap text once per process. Returns whether one is available.
///
/// `preferred` is only consulted on the first call.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            if !is_usable_font(&bytes) {
                log::debug!("not a usable font: {}", path.display());
                continue;
            }
            // ab_glyph keeps the font for the process lifetime.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    log::debug!("registered label font {}", path.display());
                    return true;
                }
                Err(_) => log::debug!("font rejected by plotters: {}", path.display()),
            }
        }
        log::warn!("no usable font found; bitmap charts are drawn without axis labels");
        false
    })
}

/// Whether `bytes` parse as a TrueType/OpenType font.
fn is_usable_font(bytes: &[u8]) -> bool {
    ab_glyph::FontRef::try_from_slice(bytes).is_ok()
}

fn rgba(c: Color) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

fn stroke(c: Color, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: rgba(c),
        filled: false,
        stroke_width: width,
    }
}

fn solid(c: Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(c),
        filled: true,
        stroke_width: 0,
    }
}

fn px((x, y): Point) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn surface_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Surface(format!("{e:?}"))
}

/// Plotters drawing area exposed as a [`Surface`].
pub struct PlottersSurface<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
    draw_text: bool,
}

impl<DB: DrawingBackend> PlottersSurface<DB> {
    /// Wrap a backend. `draw_text` should be false for bitmap backends without a font.
    pub fn new(backend: DB, draw_text: bool) -> Self {
        Self {
            area: backend.into_drawing_area(),
            draw_text,
        }
    }

    /// Flush pending output (writes the file for file-backed backends).
    pub fn present(&self) -> Result<()> {
        self.area.present().map_err(surface_err)
    }
}

impl<DB: DrawingBackend> Surface for PlottersSurface<DB> {
    fn size(&self) -> (u32, u32) {
        self.area.dim_in_pixel()
    }

    fn fill(&mut self, color: Color) -> Result<()> {
        self.area.fill(&rgba(color)).map_err(surface_err)
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, width: u32) -> Result<()> {
        if points.len() < 2 {
            return Ok(());
        }
        let pts: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
        self.area
            .draw(&PathElement::new(pts, stroke(color, width)))
            .map_err(surface_err)
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        if points.len() < 3 {
            return Ok(());
        }
        let pts: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
        self.area
            .draw(&Polygon::new(pts, solid(color)))
            .map_err(surface_err)
    }

    fn fill_rect(&mut self, (x, y): Point, (w, h): (f64, f64), color: Color) -> Result<()> {
        let corners = [px((x, y)), px((x + w, y + h))];
        self.area
            .draw(&Rectangle::new(corners, solid(color)))
            .map_err(surface_err)
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> Result<()> {
        self.area
            .draw(&Circle::new(px(center), radius.round() as i32, solid(color)))
            .map_err(surface_err)
    }

    fn text(&mut self, text: &str, at: Point, font_px: u32, color: Color) -> Result<()> {
        if !self.draw_text {
            return Ok(());
        }
        let style = (FONT_FAMILY, font_px as f64)
            .into_font()
            .color(&rgba(color))
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        self.area
            .draw(&Text::new(text.to_string(), px(at), style))
            .map_err(surface_err)
    }
}

/// Image formats [`export_image`] can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Infer from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => Some(ImageFormat::Png),
            Some("svg") => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

/// Render the current chart into an image file; the format follows the extension.
pub fn export_image<P: AsRef<Path>>(
    out_path: P,
    store: &SeriesStore,
    config: &ChartConfig,
    geometry: &Geometry,
    font_path: Option<&Path>,
) -> anyhow::Result<()> {
    let out_path = out_path.as_ref();
    let size = (geometry.width, geometry.height);
    match ImageFormat::from_path(out_path) {
        Some(ImageFormat::Svg) => {
            let mut surface = PlottersSurface::new(SVGBackend::new(out_path, size), true);
            render(&mut surface, store, config, geometry)?;
            surface.present()?;
        }
        Some(ImageFormat::Png) => {
            let with_text = ensure_fonts_registered(font_path);
            let mut surface = PlottersSurface::new(BitMapBackend::new(out_path, size), with_text);
            render(&mut surface, store, config, geometry)?;
            surface.present()?;
        }
        None => bail!(
            "unsupported image format for {} (use .png or .svg)",
            out_path.display()
        ),
    }
    log::debug!("exported chart to {}", out_path.display());
    Ok(())
}

/// Bitmap surface drawing straight into a packed RGB buffer of `width * height * 3` bytes.
pub fn bitmap_surface<'a>(
    buf: &'a mut [u8],
    geometry: &Geometry,
    font_path: Option<&Path>,
) -> anyhow::Result<PlottersSurface<BitMapBackend<'a>>> {
    let needed = geometry.width as usize * geometry.height as usize * 3;
    if buf.len() != needed {
        bail!("pixel buffer holds {} bytes, expected {needed}", buf.len());
    }
    let with_text = ensure_fonts_registered(font_path);
    let size = (geometry.width, geometry.height);
    Ok(PlottersSurface::new(BitMapBackend::with_buffer(buf, size), with_text))
}

/// Render the current chart into a packed RGB buffer.
pub fn render_rgb(
    buf: &mut [u8],
    store: &SeriesStore,
    config: &ChartConfig,
    geometry: &Geometry,
    font_path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut surface = bitmap_surface(buf, geometry, font_path)?;
    render(&mut surface, store, config, geometry).context("rendering chart frame")?;
    surface.present()?;
    Ok(())
}
