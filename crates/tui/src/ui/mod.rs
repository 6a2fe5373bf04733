//! UI layer: components, widgets, theme, focus, and the runtime loop.

pub mod components;
pub mod focus;
pub mod keyboard;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod widgets;
