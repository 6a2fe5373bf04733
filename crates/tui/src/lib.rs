//! # huepick TUI
//!
//! A terminal form of palette select buttons. Each button shows a swatch of
//! the palette chosen for its field and opens a searchable list of catalog
//! palettes. Committed selections go back to the form owner, which validates
//! and persists them.
//!
//! ## Architecture
//!
//! - `ui::components::palette_select` holds the selection state machine, the
//!   render projection, and the button component.
//! - `ui::components::palette_list` is the popover list.
//! - `ui::keyboard` provides scoped window-level key listeners.
//! - `ui::main_component` hosts the form and routes input.
//! - `ui::runtime` owns the terminal and the event loop.

mod app;
mod ui;

use std::rc::Rc;

use anyhow::Result;
use huepick_catalog::PaletteCatalog;
use huepick_util::{AppConfig, UserPreferences};

use app::App;

/// Runs the TUI until the user quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be set up, drawn to, or
/// restored.
pub async fn run(catalog: Rc<dyn PaletteCatalog>, config: AppConfig, preferences: UserPreferences) -> Result<()> {
    ui::runtime::run_app(App::new(catalog, config, preferences)).await
}
