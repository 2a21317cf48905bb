//! Color types for backdrop surfaces.
//!
//! [`Srgb`] is an opaque color with components in [0, 1]. [`Rgba`] adds an
//! alpha channel and is what every [`Surface`](crate::Surface) draw call
//! accepts. Both have a hex form: `#rrggbb` and `#rrggbbaa`.

use crate::error::BackdropError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with components in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"`. The hex round-trip has 8-bit
/// quantization (1/255 precision loss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// sRGB color plus straight (non-premultiplied) alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Srgb,
    pub alpha: f64,
}

impl Srgb {
    pub const BLACK: Srgb = Srgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub const WHITE: Srgb = Srgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `BackdropError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, BackdropError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        // from_str_radix alone would let a sign through, e.g. "+f+f+f"
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BackdropError::InvalidColor(format!(
                "expected 6 hex digits, got {:?}",
                hex
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|e| BackdropError::InvalidColor(format!("{hex:?}: {e}")))
        };
        Ok(Srgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Components quantized to 8-bit with rounding, clamped to [0, 1] first.
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Fully opaque version of this color.
    pub fn opaque(self) -> Rgba {
        self.with_alpha(1.0)
    }

    /// This color with the given alpha, clamped to [0, 1]. NaN becomes 0.
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        let alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Rgba { color: self, alpha }
    }
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba {
        color: Srgb::BLACK,
        alpha: 0.0,
    };

    /// The alpha byte: `floor(alpha * 255)`.
    ///
    /// Truncation matches how the page encoded star opacity into fill styles,
    /// so an opacity just below 1/255 still renders as fully transparent.
    pub fn alpha8(self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).floor() as u8
    }

    /// Quantized `[r, g, b, a]` bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        let [r, g, b] = self.color.to_rgb8();
        [r, g, b, self.alpha8()]
    }

    /// Converts to a CSS-compatible `"#rrggbbaa"` string.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
