//! [`Surface`] over an HTML canvas 2D context.

use backdrop_core::{Rgba, Size, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws onto a `<canvas>` through its 2D context.
///
/// The size is read from the canvas on every call, so a resize handler that
/// sets `canvas.width`/`canvas.height` is picked up by the next frame.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("2d canvas context not supported")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        // arc() throws on a negative radius
        if !(radius > 0.0) {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx.begin_path();
        if self.ctx.arc(cx, cy, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }
}
