use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::HexColor;

/// Identifier naming a palette in a catalog.
///
/// The empty identifier is a valid value meaning "no palette". Lookups and the
/// picker treat it exactly like an absent identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteId(String);

impl PaletteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "no palette" identifier.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `None` for the empty identifier so callers can chain fallbacks.
    pub fn non_empty(&self) -> Option<&PaletteId> {
        (!self.is_empty()).then_some(self)
    }
}

impl From<&str> for PaletteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PaletteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PaletteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PaletteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaletteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered set of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub id: PaletteId,
    pub name: String,
    pub colors: Vec<HexColor>,
}

impl Palette {
    pub fn new(id: impl Into<PaletteId>, name: impl Into<String>, colors: Vec<HexColor>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors,
        }
    }
}

/// Display variant for palette swatches. Purely cosmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwatchVariant {
    #[default]
    Tile,
    Sprite,
}

impl fmt::Display for SwatchVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwatchVariant::Tile => f.write_str("tile"),
            SwatchVariant::Sprite => f.write_str("sprite"),
        }
    }
}
