//! Application state for the huepick form.
//!
//! The `App` is the owner of every palette field: it holds the current value
//! of each, decides whether a committed selection is acceptable, and persists
//! accepted selections. Palette select buttons never write values directly;
//! they report commits and the owner applies them.

use std::rc::Rc;

use huepick_catalog::PaletteCatalog;
use huepick_types::{PaletteId, PickerOptions};
use huepick_util::{AppConfig, FieldConfig, UserPreferences};
use tracing::{info, warn};

use crate::ui::keyboard::KeyboardHub;
use crate::ui::theme::{self, Theme};

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects that many components read, so they do not have
/// to be threaded through every call.
#[derive(Debug)]
pub struct SharedCtx {
    /// Palette catalog queried on every render.
    pub catalog: Rc<dyn PaletteCatalog>,
    /// Active UI theme.
    pub theme: Box<dyn Theme>,
    /// Window-level key listeners.
    pub keyboard: KeyboardHub,
}

impl SharedCtx {
    pub fn new(catalog: Rc<dyn PaletteCatalog>) -> Self {
        Self {
            catalog,
            theme: theme::load(),
            keyboard: KeyboardHub::new(),
        }
    }
}

/// One form field and its current value.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub config: FieldConfig,
    /// `None` when nothing has been chosen (or "none" was chosen).
    pub value: Option<PaletteId>,
}

impl FieldState {
    pub fn options(&self) -> &PickerOptions {
        &self.config.options
    }

    pub fn name(&self) -> &str {
        &self.config.options.name
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub fields: Vec<FieldState>,
    preferences: UserPreferences,
    /// Last status line message.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Build the form, restoring each field's value from preferences.
    pub fn new(catalog: Rc<dyn PaletteCatalog>, config: AppConfig, preferences: UserPreferences) -> Self {
        let fields = config
            .fields
            .into_iter()
            .map(|config| {
                let value = preferences
                    .selection(&config.options.name)
                    .and_then(PaletteId::non_empty)
                    .cloned();
                FieldState { config, value }
            })
            .collect();
        Self {
            ctx: SharedCtx::new(catalog),
            fields,
            preferences,
            status: None,
            should_quit: false,
        }
    }

    pub fn field(&self, index: usize) -> Option<&FieldState> {
        self.fields.get(index)
    }

    /// Apply a committed selection for `field`.
    ///
    /// The empty id is accepted only for optional fields; any other id must
    /// exist in the catalog. Returns whether the value was applied.
    pub fn apply_selection(&mut self, field: &str, value: PaletteId) -> bool {
        let Some(index) = self.fields.iter().position(|state| state.name() == field) else {
            warn!(field, "selection for unknown field ignored");
            return false;
        };
        let optional = self.fields[index].options().optional;

        let description = if value.is_empty() {
            if !optional {
                warn!(field, "empty selection rejected for required field");
                self.status = Some(format!("{} requires a palette", self.fields[index].config.label));
                return false;
            }
            self.fields[index].options().optional_label().to_string()
        } else {
            match self.ctx.catalog.lookup(&value) {
                Some(palette) => palette.name,
                None => {
                    warn!(field, palette = %value, "selection of unknown palette ignored");
                    self.status = Some(format!("Unknown palette '{value}'"));
                    return false;
                }
            }
        };

        if let Err(error) = self.preferences.set_selection(field, value.clone()) {
            warn!(field, error = %error, "failed to persist selection");
        }
        let state = &mut self.fields[index];
        state.value = value.non_empty().cloned();
        info!(field, palette = %value, "selection applied");
        self.status = Some(format!("{} set to {description}", state.config.label));
        true
    }
}
