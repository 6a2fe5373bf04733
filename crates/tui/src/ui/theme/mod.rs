//! Theme styling for the TUI layer.
//!
//! A single Nord palette mapped to semantic roles, plus helper builders for
//! ratatui widgets. Components go through the [`Theme`] trait rather than
//! hard-coding colors.

pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use nord::NordTheme;
pub use roles::Theme;

/// The theme used when the host does not supply one.
pub fn load() -> Box<dyn Theme> {
    Box::new(NordTheme::new())
}
