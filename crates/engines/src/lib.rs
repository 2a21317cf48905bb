#![deny(unsafe_code)]
//! Field registry: maps field names to implementations and renders scenes
//! on the CPU.
//!
//! This crate sits between `backdrop-core` (which defines the `Animation`
//! trait) and the individual field crates (`backdrop-particles`,
//! `backdrop-stars`). Both the CLI and the browser binding go through it so
//! name dispatch lives in one place.

pub mod render;

#[cfg(feature = "png")]
pub mod snapshot;

use backdrop_core::error::BackdropError;
use backdrop_core::{Animation, Size, Surface};
use backdrop_particles::ParticleField;
use backdrop_stars::StarField;
use serde_json::Value;

/// All available field names.
const FIELD_NAMES: &[&str] = &["particles", "stars"];

/// Enumeration of all available background fields.
///
/// Wraps each field implementation and delegates `Animation` trait methods.
/// Use [`FieldKind::from_name`] for string-based construction (CLI, scenes).
pub enum FieldKind {
    /// Drifting particles reflected at the surface edges.
    Particles(ParticleField),
    /// Stars flying toward the viewer.
    Stars(StarField),
}

impl FieldKind {
    /// Constructs a field by name.
    ///
    /// Returns `BackdropError::UnknownField` if the name is not recognized,
    /// or the field's own error if `params` names a bad palette or color.
    pub fn from_name(
        name: &str,
        size: Size,
        seed: u64,
        params: &Value,
    ) -> Result<Self, BackdropError> {
        match name {
            "particles" => Ok(FieldKind::Particles(ParticleField::from_json(
                size, seed, params,
            )?)),
            "stars" => Ok(FieldKind::Stars(StarField::from_json(size, seed, params)?)),
            _ => Err(BackdropError::UnknownField(name.to_string())),
        }
    }

    /// Returns a slice of all recognized field names.
    pub fn list_fields() -> &'static [&'static str] {
        FIELD_NAMES
    }

    /// The registry name of this field.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Particles(_) => "particles",
            FieldKind::Stars(_) => "stars",
        }
    }
}

impl Animation for FieldKind {
    fn init(&mut self, count: usize, size: Size) {
        match self {
            FieldKind::Particles(f) => f.init(count, size),
            FieldKind::Stars(f) => f.init(count, size),
        }
    }

    fn update(&mut self, size: Size) {
        match self {
            FieldKind::Particles(f) => f.update(size),
            FieldKind::Stars(f) => f.update(size),
        }
    }

    fn render(&self, surface: &mut dyn Surface) {
        match self {
            FieldKind::Particles(f) => f.render(surface),
            FieldKind::Stars(f) => f.render(surface),
        }
    }

    fn len(&self) -> usize {
        match self {
            FieldKind::Particles(f) => f.len(),
            FieldKind::Stars(f) => f.len(),
        }
    }

    fn params(&self) -> Value {
        match self {
            FieldKind::Particles(f) => f.params(),
            FieldKind::Stars(f) => f.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            FieldKind::Particles(f) => f.param_schema(),
            FieldKind::Stars(f) => f.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::PixelSurface;
    use serde_json::json;

    const SIZE: Size = Size::new(64.0, 48.0);

    #[test]
    fn from_name_particles_succeeds() {
        let field = FieldKind::from_name("particles", SIZE, 42, &json!({})).unwrap();
        assert_eq!(field.name(), "particles");
        assert_eq!(field.len(), 30);
    }

    #[test]
    fn from_name_stars_succeeds() {
        let field = FieldKind::from_name("stars", SIZE, 42, &json!({})).unwrap();
        assert_eq!(field.name(), "stars");
        assert_eq!(field.len(), 250);
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = FieldKind::from_name("fireflies", SIZE, 42, &json!({}));
        assert!(matches!(result, Err(BackdropError::UnknownField(_))));
    }

    #[test]
    fn from_name_propagates_palette_errors() {
        let result = FieldKind::from_name("stars", SIZE, 42, &json!({"palette": "plaid"}));
        assert!(matches!(result, Err(BackdropError::UnknownPalette(_))));
    }

    #[test]
    fn list_fields_includes_both() {
        let names = FieldKind::list_fields();
        assert!(names.contains(&"particles"));
        assert!(names.contains(&"stars"));
    }

    #[test]
    fn every_listed_field_constructs() {
        for name in FieldKind::list_fields() {
            let field = FieldKind::from_name(name, SIZE, 1, &json!({})).unwrap();
            assert_eq!(&field.name(), name);
        }
    }

    #[test]
    fn trait_delegation_init_update_render() {
        let mut field = FieldKind::from_name("particles", SIZE, 42, &json!({})).unwrap();
        field.init(5, SIZE);
        assert_eq!(field.len(), 5);
        field.update(SIZE);

        let mut surface = PixelSurface::new(64, 48).unwrap();
        field.render(&mut surface);
        assert!(surface.covered_pixels() > 0);
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let field = FieldKind::from_name("stars", SIZE, 42, &json!({"speed": 3})).unwrap();
        assert_eq!(field.params()["speed"], 3.0);
        assert!(field.param_schema().get("background").is_some());
    }
}
