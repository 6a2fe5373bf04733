use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a palette color is not a valid `#rgb`/`#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{input}' has {len} hex digits; expected 3 or 6")]
    InvalidLength { input: String, len: usize },
    #[error("color '{0}' contains a non-hex digit")]
    InvalidDigit(String),
}

/// An opaque sRGB color as stored in palette catalogs.
///
/// Serialized as a lowercase `#rrggbb` string; both the short `#rgb` and long
/// forms are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the `(r, g, b)` channels.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse `#rgb` or `#rrggbb` (case-insensitive).
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(input.to_string()))?;
        let nibbles = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| ColorParseError::InvalidDigit(input.to_string()))?;
        match nibbles.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::new((r1 << 4) | r2, (g1 << 4) | g2, (b1 << 4) | b2)),
            other => Err(ColorParseError::InvalidLength {
                input: input.to_string(),
                len: other.len(),
            }),
        }
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
