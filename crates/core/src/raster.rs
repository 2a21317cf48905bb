//! In-memory RGBA8 surface for native hosts and tests.
//!
//! [`PixelSurface`] mirrors a browser canvas: straight-alpha pixels, drawing
//! with source-over blending, and a size that can change under the animation
//! through [`PixelSurface::resize`]. A pixel is covered by a shape when its
//! center lies inside the shape.

use crate::color::Rgba;
use crate::error::BackdropError;
use crate::surface::{Size, Surface};

/// RGBA8 pixel buffer implementing [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Creates a transparent surface. Zero dimensions are allowed.
    ///
    /// Returns `BackdropError::InvalidDimensions` if the buffer size overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, BackdropError> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA bytes, `width * height * 4` long.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// The `[r, g, b, a]` bytes at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Changes the surface size, discarding the content like a canvas does.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), BackdropError> {
        let len = buffer_len(width, height)?;
        log::debug!(
            "surface resized {}x{} -> {width}x{height}",
            self.width,
            self.height
        );
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        Ok(())
    }

    /// Source-over blend of `color` onto the pixel at `(x, y)`.
    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        let [sr, sg, sb, sa] = color.to_rgba8();
        if sa == 0 {
            return;
        }
        let i = (y * self.width + x) * 4;
        let dst = &mut self.pixels[i..i + 4];
        if sa == 255 {
            dst.copy_from_slice(&[sr, sg, sb, 255]);
            return;
        }

        let sa = sa as f64 / 255.0;
        let da = dst[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for (d, s) in dst[..3].iter_mut().zip([sr, sg, sb]) {
            let mixed = (s as f64 * sa + *d as f64 * da * (1.0 - sa)) / out_a;
            *d = mixed.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    /// Half-open pixel index span `[lo, hi)` whose centers lie in `[from, to)`.
    fn span(from: f64, to: f64, max: usize) -> (usize, usize) {
        let lo = (from - 0.5).ceil().clamp(0.0, max as f64) as usize;
        let hi = (to - 0.5).ceil().clamp(0.0, max as f64) as usize;
        (lo, hi.max(lo))
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        if ![x, y, width, height].iter().all(|v| v.is_finite()) || width <= 0.0 || height <= 0.0
        {
            return;
        }
        let (x0, x1) = Self::span(x, x + width, self.width);
        let (y0, y1) = Self::span(y, y + height, self.height);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        if ![cx, cy, radius].iter().all(|v| v.is_finite()) || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let (x0, x1) = Self::span(cx - radius, cx + radius + 1.0, self.width);
        let (y0, y1) = Self::span(cy - radius, cy + radius + 1.0, self.height);
        for py in y0..y1 {
            let dy = py as f64 + 0.5 - cy;
            for px in x0..x1 {
                let dx = px as f64 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.blend(px, py, color);
                }
            }
        }
    }
}

fn buffer_len(width: usize, height: usize) -> Result<usize, BackdropError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(BackdropError::InvalidDimensions)
}
