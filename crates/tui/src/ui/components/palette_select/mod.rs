//! Palette select button: a swatch trigger that opens a palette list.
//!
//! Split into an interaction state machine ([`controller`]), a pure
//! projection to what gets drawn ([`shell`]), and the component gluing them
//! to focus, input and the popover list.

pub mod controller;
mod palette_select_component;
pub mod shell;

pub use palette_select_component::{PaletteSelectButton, PopoverChange};
