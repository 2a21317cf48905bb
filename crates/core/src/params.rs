//! Lenient typed accessors for a field's JSON params object.
//!
//! Missing keys and wrong types fall back to the default: a page that passes
//! `{"count": "lots"}` still gets an animation. Only a palette or color that
//! is present but unparseable is reported, since silently swapping colors
//! would hide a typo.

use serde_json::Value;

use crate::color::Srgb;
use crate::error::BackdropError;
use crate::palette::Palette;

/// `params[name]` as `f64`, accepting integers too.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as a hex color. A missing or non-string value gives
/// `default`; a string that is not a color is an error.
pub fn param_color(params: &Value, name: &str, default: Srgb) -> Result<Srgb, BackdropError> {
    match params.get(name).and_then(Value::as_str) {
        Some(hex) => Srgb::from_hex(hex),
        None => Ok(default),
    }
}

/// `params[name]` as a built-in palette name, or a list of hex colors.
pub fn param_palette(params: &Value, name: &str, default: &str) -> Result<Palette, BackdropError> {
    match params.get(name) {
        Some(Value::String(palette)) => Palette::from_name(palette),
        Some(Value::Array(items)) => {
            let hexes = items
                .iter()
                .map(|v| {
                    v.as_str().ok_or_else(|| {
                        BackdropError::InvalidPalette(format!("expected hex string, got {v}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Palette::from_hex(&hexes)
        }
        _ => Palette::from_name(default),
    }
}
