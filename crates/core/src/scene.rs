//! Reproducible description of a native render.
//!
//! A [`Scene`] names the field, the surface size, the field's params, the
//! PRNG seed, and how many frames to run. The CLI reads it from a JSON file;
//! the same scene always produces the same final frame.

use crate::error::BackdropError;
use crate::surface::Size;
use serde::{Deserialize, Serialize};

fn default_frames() -> u64 {
    120
}

fn default_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub field: String,
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_frames")]
    pub frames: u64,
}

impl Scene {
    /// A scene with empty params and the default frame count.
    pub fn new(field: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            field: field.to_string(),
            width,
            height,
            params: default_params(),
            seed,
            frames: default_frames(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    /// Checks that the scene can be rasterized: non-zero dimensions whose
    /// pixel buffer does not overflow.
    pub fn validate(&self) -> Result<(), BackdropError> {
        if self.width == 0 || self.height == 0 {
            return Err(BackdropError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BackdropError::InvalidDimensions)?;
        Ok(())
    }

    /// Parses a scene from JSON text.
    pub fn from_json(text: &str) -> Result<Self, BackdropError> {
        serde_json::from_str(text).map_err(|e| BackdropError::InvalidScene(e.to_string()))
    }
}
