//! The drawing surface the renderer paints on.
//!
//! [`crate::plotters_surface::PlottersSurface`] draws to bitmaps and SVG files;
//! [`RecordingSurface`] keeps the draw calls as data.

use crate::error::Result;
use crate::geometry::Point;
use crate::palette::Color;

/// Minimal 2D canvas in pixel coordinates, origin top-left.
pub trait Surface {
    /// Size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Paint the whole surface.
    fn fill(&mut self, color: Color) -> Result<()>;

    /// Open polyline through `points`.
    fn stroke_path(&mut self, points: &[Point], color: Color, width: u32) -> Result<()>;

    /// Closed polygon; need not be convex.
    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()>;

    fn fill_rect(&mut self, top_left: Point, size: (f64, f64), color: Color) -> Result<()>;

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> Result<()>;

    /// Text with its baseline-left corner at `at`.
    fn text(&mut self, text: &str, at: Point, font_px: u32, color: Color) -> Result<()>;
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill(Color),
    Path {
        points: Vec<Point>,
        color: Color,
        width: u32,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
    },
    Rect {
        top_left: Point,
        size: (f64, f64),
        color: Color,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Text {
        text: String,
        at: Point,
        font_px: u32,
        color: Color,
    },
}

/// Surface that records every call instead of rasterizing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded polylines, in draw order.
    pub fn paths(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Path { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Fill(color));
        Ok(())
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, width: u32) -> Result<()> {
        self.ops.push(DrawOp::Path {
            points: points.to_vec(),
            color,
            width,
        });
        Ok(())
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) -> Result<()> {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
        });
        Ok(())
    }

    fn fill_rect(&mut self, top_left: Point, size: (f64, f64), color: Color) -> Result<()> {
        self.ops.push(DrawOp::Rect {
            top_left,
            size,
            color,
        });
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn text(&mut self, text: &str, at: Point, font_px: u32, color: Color) -> Result<()> {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            font_px,
            color,
        });
        Ok(())
    }
}
