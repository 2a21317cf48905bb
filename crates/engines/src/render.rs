//! CPU-side rendering of a [`Scene`] onto a [`PixelSurface`].
//!
//! Always available (no feature gate) so tests and the PNG snapshot path
//! share the same frame loop.

use backdrop_core::error::BackdropError;
use backdrop_core::{Animation, AnimationScheduler, FrameSource, PixelSurface, Scene};

use crate::FieldKind;

/// Builds the scene's field and runs it for `scene.frames` ticks.
///
/// Returns the final frame. A scene with zero frames yields the initial
/// state rendered once. Fails on invalid dimensions or field construction
/// errors.
pub fn render_scene<F: FrameSource + ?Sized>(
    scene: &Scene,
    frames: &mut F,
) -> Result<PixelSurface, BackdropError> {
    scene.validate()?;
    let field = FieldKind::from_name(&scene.field, scene.size(), scene.seed, &scene.params)?;
    let mut surface = PixelSurface::new(scene.width, scene.height)?;

    let mut scheduler = AnimationScheduler::new(field).with_tick_limit(scene.frames);
    let ticks = scheduler.run(&mut surface, frames);
    if ticks == 0 {
        scheduler.animation().render(&mut surface);
    }
    log::info!(
        "rendered {} at {}x{} for {ticks} frames",
        scene.field,
        scene.width,
        scene.height
    );
    Ok(surface)
}
