//! Axis-aligned face regions in pixel-buffer coordinates

use serde::{Deserialize, Serialize};

/// Rectangular face region in pixel-buffer coordinates.
///
/// Always axis-aligned; always clamped to buffer bounds before pixel work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaceRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a region from floating-point detector coordinates, dropping
    /// any part left of / above the origin.
    pub fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        let x0 = x.max(0.0);
        let y0 = y.max(0.0);
        // Width shrinks by whatever was clipped at the origin.
        let w = (width - (x0 - x)).max(0.0);
        let h = (height - (y0 - y)).max(0.0);
        Self {
            x: x0 as u32,
            y: y0 as u32,
            width: w as u32,
            height: h as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Region center in pixel coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Expand by `padding` pixels on every side, clipped at the origin.
    pub fn expanded(&self, padding: u32) -> Self {
        let x = self.x.saturating_sub(padding);
        let y = self.y.saturating_sub(padding);
        Self {
            x,
            y,
            width: self.width + (self.x - x) + padding,
            height: self.height + (self.y - y) + padding,
        }
    }

    /// Clamp to a buffer of the given dimensions. May produce a zero-area
    /// region, which callers treat as a no-op.
    pub fn clamped(&self, buf_width: u32, buf_height: u32) -> Self {
        let x = self.x.min(buf_width);
        let y = self.y.min(buf_height);
        Self {
            x,
            y,
            width: self.width.min(buf_width - x),
            height: self.height.min(buf_height - y),
        }
    }

    /// Scale from one coordinate space to another (detector frame to
    /// capture buffer). Factors of 1.0 are the identity.
    pub fn scaled(&self, sx: f32, sy: f32) -> Self {
        Self {
            x: (self.x as f32 * sx) as u32,
            y: (self.y as f32 * sy) as u32,
            width: (self.width as f32 * sx) as u32,
            height: (self.height as f32 * sy) as u32,
        }
    }

    /// Whether the point lies inside the region.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}
