//! Hex color parsing.
//!
//! Colors arrive from configuration as `#RRGGBB` strings (the leading `#`
//! is optional). Anything else is rejected with
//! [`AdError::MalformedColor`] instead of being truncated.

use crate::error::AdError;
use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Fully opaque RGBA pixel of this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }

    /// Linear interpolation towards `other`; `t` is clamped to [0, 1].
    ///
    /// Channels are truncated, not rounded.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * t) as u8
        };
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        hex_to_rgb(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string.
pub fn hex_to_rgb(hex: &str) -> Result<Color, AdError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 {
        return Err(AdError::malformed_color(
            hex,
            format!("expected 6 hex digits, got {}", digits.chars().count()),
        ));
    }
    // from_str_radix tolerates a leading '+', so check the charset first
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AdError::malformed_color(hex, "invalid hex digit"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| AdError::malformed_color(hex, e.to_string()))
    };

    Ok(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format a color as lowercase `#rrggbb`.
pub fn rgb_to_hex(color: Color) -> String {
    color.to_string()
}
