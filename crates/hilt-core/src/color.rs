//! Color values as stored in configurations and as consumed by materials

use crate::error::{HiltError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reserved aluminium color. Parts painted with it are always metal.
pub const ALUMINIUM: &str = "#eceae7";

/// A `#rrggbb` color string, normalized to lowercase.
///
/// This is the persisted form of every part color. Comparisons against the
/// reserved values are exact string matches after normalization; near-white
/// custom colors are never treated as aluminium.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `#rrggbb` string (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| HiltError::InvalidColor(s.to_string()))?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HiltError::InvalidColor(s.to_string()));
        }
        Ok(Self(format!("#{}", digits.to_ascii_lowercase())))
    }

    /// The reserved aluminium color
    pub fn aluminium() -> Self {
        Self(ALUMINIUM.to_string())
    }

    /// Whether this is the reserved aluminium value
    pub fn is_aluminium(&self) -> bool {
        self.0 == ALUMINIUM
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Packed 0xRRGGBB value
    pub fn to_u32(&self) -> u32 {
        // Validated on construction.
        u32::from_str_radix(&self.0[1..], 16).unwrap_or(0)
    }

    pub fn to_color(&self) -> Color {
        Color::from_hex(self.to_u32())
    }
}

impl FromStr for HexColor {
    type Err = HiltError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HiltError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Scale the RGB channels, leaving alpha untouched
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
