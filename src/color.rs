//! Dye colors and luminance.
//!
//! Dye colors come in from the caller as hex strings (`#RGB` or `#RRGGBB`,
//! case-insensitive, `#` optional). Luminance uses the ITU-R BT.709
//! coefficients, the same weights as a standard grayscale conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DyeError, Result};

/// ITU-R BT.709 luminosity coefficients
pub const LUMA_R: f32 = 0.2126;
pub const LUMA_G: f32 = 0.7152;
pub const LUMA_B: f32 = 0.0722;

/// Relative luminance of an 8-bit RGB triple, normalized to 0.0-1.0.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32) / 255.0
}

/// RGB dye color, immutable for the duration of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DyeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DyeColor {
    /// Fallback dye for callers that received a malformed color.
    pub const NEUTRAL_GRAY: DyeColor = DyeColor::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    ///
    /// Accepts `#RGB`, `#RRGGBB`, `RGB` and `RRGGBB` in any case.
    /// Shorthand digits are expanded (`F` -> `FF`).
    ///
    /// # Errors
    /// [`DyeError::InvalidColorFormat`] for any other length or a non-hex digit.
    pub fn from_hex(input: &str) -> Result<Self> {
        let s = input.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let invalid = || DyeError::InvalidColorFormat(input.to_string());
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let digit = |i: usize, len: usize| {
            u8::from_str_radix(&s[i..i + len], 16).map_err(|_| invalid())
        };

        match s.len() {
            3 => Ok(Self::new(digit(0, 1)? * 17, digit(1, 1)? * 17, digit(2, 1)? * 17)),
            6 => Ok(Self::new(digit(0, 2)?, digit(2, 2)?, digit(4, 2)?)),
            _ => Err(invalid()),
        }
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as an array, in R, G, B order.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for DyeColor {
    fn default() -> Self {
        // Deep magenta, a typical procion dye swatch
        Self::new(0xC2, 0x18, 0x5B)
    }
}

impl FromStr for DyeColor {
    type Err = DyeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for DyeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for DyeColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DyeColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
