//! UI components: palette select button and its popover list.

pub mod component;
pub mod palette_list;
pub mod palette_select;

pub use component::*;
