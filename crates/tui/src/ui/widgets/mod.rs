//! Small, stateless UI widgets used across components.

pub mod hints;
pub mod overlay;
pub mod swatch;

pub use hints::draw_hints;
