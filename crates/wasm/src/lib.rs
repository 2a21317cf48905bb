#![deny(unsafe_code)]
//! Browser bindings: run a field on a page `<canvas>`.
//!
//! Each `start_*` call looks up its canvas, sizes it, keeps it sized on
//! window resize, and drives the field from `requestAnimationFrame` for as
//! long as the page lives. A missing canvas is not an error; the call just
//! reports `false` so one script can serve pages without a backdrop.

mod canvas;

pub use canvas::Canvas2dSurface;

use backdrop_core::{Animation, AnimationScheduler, SchedulerState, Size, Surface};
use backdrop_particles::{ParticleField, ParticleParams};
use backdrop_stars::{StarField, StarParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, Window};

/// Element id of the navigation-bar particle canvas.
const PARTICLES_CANVAS_ID: &str = "nav-particles";
/// Element id of the full-page star canvas.
const STARS_CANVAS_ID: &str = "stars";

/// How a canvas tracks its layout.
#[derive(Debug, Clone, Copy)]
enum Sizing {
    /// Window width × height of the canvas's parent element.
    ParentHeight,
    /// Window inner width × inner height.
    Viewport,
}

impl Sizing {
    fn apply(self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let window = window()?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0);
        let height = match self {
            Sizing::Viewport => window.inner_height()?.as_f64().unwrap_or(0.0),
            Sizing::ParentHeight => canvas
                .parent_element()
                .and_then(|p| p.dyn_into::<HtmlElement>().ok())
                .map(|p| p.offset_height() as f64)
                .unwrap_or(canvas.height() as f64),
        };
        let (w, h) = (width.max(0.0) as u32, height.max(0.0) as u32);
        if canvas.width() != w || canvas.height() != h {
            canvas.set_width(w);
            canvas.set_height(h);
        }
        Ok(())
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// The canvas with `id`, or `None` if there is no such element or it is not a canvas.
fn find_canvas(id: &str) -> Result<Option<HtmlCanvasElement>, JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    Ok(document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok()))
}

fn seed() -> u64 {
    js_sys::Date::now() as u64
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(callback.as_ref().unchecked_ref())
}

/// Sizes the canvas, keeps it sized on resize, and runs `make`'s field on it.
fn start<A, F>(canvas: HtmlCanvasElement, sizing: Sizing, make: F) -> Result<(), JsValue>
where
    A: Animation + 'static,
    F: FnOnce(Size) -> A,
{
    sizing.apply(&canvas)?;

    let on_resize = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            if let Err(e) = sizing.apply(&canvas) {
                log::warn!("canvas resize failed: {e:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    window()?.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let surface = Canvas2dSurface::new(canvas)?;
    let animation = make(surface.size());
    let surface = Rc::new(RefCell::new(surface));
    let scheduler = Rc::new(RefCell::new(AnimationScheduler::new(animation)));

    // The frame closure re-requests itself, so it has to reach its own handle.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let state = scheduler.borrow_mut().tick(&mut *surface.borrow_mut());
        if state == SchedulerState::Stopped {
            return;
        }
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_frame(callback) {
                log::warn!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        request_frame(callback)?;
    }
    Ok(())
}

/// Starts the drifting-particle field on canvas `canvas_id`.
///
/// The canvas spans the window width and its parent element's height.
/// Returns `false` without doing anything if there is no such canvas.
#[wasm_bindgen]
pub fn start_particles(canvas_id: &str) -> Result<bool, JsValue> {
    let Some(canvas) = find_canvas(canvas_id)? else {
        return Ok(false);
    };
    let seed = seed();
    start(canvas, Sizing::ParentHeight, |size| {
        ParticleField::new(size, seed, ParticleParams::default())
    })?;
    Ok(true)
}

/// Starts the star-warp field on canvas `canvas_id`.
///
/// The canvas spans the window. Returns `false` without doing anything if
/// there is no such canvas.
#[wasm_bindgen]
pub fn start_stars(canvas_id: &str) -> Result<bool, JsValue> {
    let Some(canvas) = find_canvas(canvas_id)? else {
        return Ok(false);
    };
    let seed = seed();
    start(canvas, Sizing::Viewport, |size| {
        StarField::new(size, seed ^ 0x9e37_79b9_7f4a_7c15, StarParams::default())
    })?;
    Ok(true)
}

/// Starts both fields on the site's standard canvases.
///
/// Returns how many of the two were found and started.
#[wasm_bindgen]
pub fn start_backdrop() -> Result<u32, JsValue> {
    let started = [
        start_particles(PARTICLES_CANVAS_ID)?,
        start_stars(STARS_CANVAS_ID)?,
    ];
    Ok(started.iter().filter(|&&s| s).count() as u32)
}
