//! Error types for the backdrop core.
//!
//! Animations themselves never fail while running; errors only come from
//! configuration (colors, palettes, field names) and from snapshot output.

use thiserror::Error;

/// Errors produced by backdrop operations.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Width or height was zero (or overflowed) where a raster is required.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A palette name was not one of the built-ins.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A field name was not recognized by the registry.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A scene document could not be parsed.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Writing or reading a file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
