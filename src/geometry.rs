//! Data space → pixel space mapping, grid positions and axis label placement.

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

/// Pixel coordinate, origin at the top-left corner.
pub type Point = (f64, f64);

/// Canvas size and spacing constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// Spacing of vertical grid lines and horizontal-axis labels.
    pub x_increment: u32,
    /// Spacing of horizontal grid lines and vertical-axis labels.
    pub y_increment: u32,
    /// Horizontal distance between consecutive samples.
    pub value_increment: u32,
    /// Inset of axis labels from the canvas edges.
    pub text_offset: u32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            x_increment: 150,
            y_increment: 100,
            value_increment: 20,
            text_offset: 5,
        }
    }
}

/// One axis label: text and the anchor where the renderer draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub text: String,
    pub at: Point,
}

impl Geometry {
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("x_increment", self.x_increment),
            ("y_increment", self.y_increment),
            ("value_increment", self.value_increment),
        ] {
            if v == 0 {
                return Err(ChartError::InvalidSetting {
                    name,
                    reason: "must be a positive integer".into(),
                });
            }
        }
        Ok(())
    }

    /// Number of samples in a full window: one per `value_increment` step across the width,
    /// both edges included.
    pub fn capacity(&self) -> usize {
        (self.width / self.value_increment) as usize + 1
    }

    /// Map a sample to its pixel position. Values above `height` land above the top edge.
    pub fn to_pixel(&self, index: usize, value: f64) -> Point {
        (
            index as f64 * self.value_increment as f64,
            self.height as f64 - value,
        )
    }

    /// x positions of vertical grid lines.
    pub fn vertical_grid_xs(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.width).step_by(self.x_increment as usize)
    }

    /// y positions of horizontal grid lines.
    pub fn horizontal_grid_ys(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.height).step_by(self.y_increment as usize)
    }

    /// Labels along the left edge: row `i` shows the value `height - i` that line represents.
    pub fn vertical_labels(&self) -> Vec<AxisLabel> {
        let off = self.text_offset as f64;
        self.horizontal_grid_ys()
            .map(|i| AxisLabel {
                text: (self.height - i).to_string(),
                at: (off, i as f64 + 2.0 * off),
            })
            .collect()
    }

    /// Labels along the bottom edge: column `i` shows its pixel offset.
    pub fn horizontal_labels(&self) -> Vec<AxisLabel> {
        let off = self.text_offset as f64;
        self.vertical_grid_xs()
            .map(|i| AxisLabel {
                text: i.to_string(),
                at: (i as f64 + off, self.height as f64 - off),
            })
            .collect()
    }

    /// Data index under a horizontal pixel offset, if inside a window of `len` samples.
    pub fn index_at(&self, pixel_x: f64, len: usize) -> Option<usize> {
        if !pixel_x.is_finite() || pixel_x < 0.0 {
            return None;
        }
        let idx = (pixel_x / self.value_increment as f64).floor() as usize;
        (idx < len).then_some(idx)
    }
}
