//! Popover list of catalog palettes with type-to-filter.

mod palette_list_component;
mod state;

pub use palette_list_component::{ListOutcome, PaletteListComponent};
