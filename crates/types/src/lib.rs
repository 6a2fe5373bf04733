//! Shared type definitions for the huepick workspace.
//!
//! These types are deliberately free of any terminal or rendering dependency so
//! that the catalog, preferences, and UI crates can all agree on the shape of a
//! palette and on the messages that flow between the picker and its owner.

mod color;
mod palette;
mod picker;

pub use color::{ColorParseError, HexColor};
pub use palette::{Palette, PaletteId, SwatchVariant};
pub use picker::{DEFAULT_OPTIONAL_LABEL, PickerId, PickerOptions};

/// Messages that can be sent to update the application state.
///
/// Input events are routed directly to components; this enum covers the
/// non-input notifications the runtime forwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Terminal resized
    Resize(u16, u16),
}

/// Side effects that can be triggered by state changes.
///
/// Components never reach into each other; they return effects and the
/// runtime applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Move keyboard focus back onto the trigger of the given picker.
    FocusTrigger(PickerId),
    /// The owner accepted a committed palette for one of its fields.
    ApplySelection { field: String, value: PaletteId },
    /// Leave the application.
    Quit,
}
