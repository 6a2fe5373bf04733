use serde::{Deserialize, Serialize};

use crate::{PaletteId, SwatchVariant};

/// Label used for the "no selection" option when none is configured.
pub const DEFAULT_OPTIONAL_LABEL: &str = "None";

/// Identifies one palette select button within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickerId(pub usize);

/// Configuration forwarded unchanged from the owner through the button into
/// the popover list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    /// Field name, forwarded to the list.
    pub name: String,
    pub swatch_variant: SwatchVariant,
    /// Whether "no selection" is an explicitly offerable choice.
    pub optional: bool,
    pub optional_label: Option<String>,
    /// Palette previewed when no value has been chosen.
    pub optional_default_palette_id: Option<PaletteId>,
}

impl PickerOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_variant(mut self, variant: SwatchVariant) -> Self {
        self.swatch_variant = variant;
        self
    }

    pub fn with_optional(mut self, label: Option<String>, default_palette_id: Option<PaletteId>) -> Self {
        self.optional = true;
        self.optional_label = label;
        self.optional_default_palette_id = default_palette_id;
        self
    }

    /// Text shown for the "no selection" option.
    pub fn optional_label(&self) -> &str {
        self.optional_label.as_deref().unwrap_or(DEFAULT_OPTIONAL_LABEL)
    }

    /// The fallback identifier used for previews, ignoring empty ids.
    pub fn fallback_value(&self) -> Option<&PaletteId> {
        self.optional_default_palette_id.as_ref().and_then(PaletteId::non_empty)
    }
}
