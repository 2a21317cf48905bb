//! PNG output of a [`PixelSurface`].
//!
//! This module is feature-gated behind `png` (default on) so that the browser
//! binding never pulls in the `image` crate.

use backdrop_core::error::BackdropError;
use backdrop_core::PixelSurface;
use std::path::Path;

/// Writes the surface as an RGBA PNG image.
///
/// Returns `BackdropError::InvalidDimensions` if the surface is empty or its
/// dimensions overflow `u32`, or `BackdropError::Io` on write failure.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), BackdropError> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err(BackdropError::InvalidDimensions);
    }
    let w = u32::try_from(surface.width()).map_err(|_| BackdropError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| BackdropError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.as_rgba().to_vec())
        .ok_or_else(|| BackdropError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BackdropError::Io(e.to_string()))?;
    log::debug!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
