//! The drawing surface an animation paints into.
//!
//! A [`Surface`] is owned by the host (a browser canvas, an in-memory raster).
//! It exposes its *current* size; animations read it fresh every tick and
//! never cache it, so a resize shows up on the next frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Surface dimensions in pixels.
///
/// Zero-sized surfaces are valid: they simply show nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Midpoint of the surface, the vanishing point of the star warp.
    pub fn center(self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A 2D drawing target.
///
/// Coordinates are in pixels with the origin at the top-left. Draw calls
/// outside the surface are clipped, never errors.
pub trait Surface {
    /// Current size. May change between calls (resize).
    fn size(&self) -> Size;

    /// Resets every pixel to fully transparent.
    fn clear(&mut self);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

    /// Fills a circle. A radius of zero draws nothing.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Fills the whole surface with one color.
    fn fill(&mut self, color: Rgba) {
        let size = self.size();
        self.fill_rect(0.0, 0.0, size.width, size.height, color);
    }
}
