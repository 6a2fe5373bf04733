//! User preference persistence for huepick.
//!
//! A tiny JSON-backed store that remembers the palette committed for each form
//! field. The file lives in the standard configuration directory
//! (`~/.config/huepick/preferences.json` on most platforms).

use std::fs;
use std::path::{Path, PathBuf};

use huepick_types::PaletteId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::resolve_config_file;

/// Environment variable allowing callers to override the preferences file path.
pub const PREFERENCES_PATH_ENV: &str = "HUEPICK_PREFERENCES_PATH";

/// Default filename for the JSON payload.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Error surfaced when reading or writing preferences fails.
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// I/O failure (for example, permissions or missing directory).
    #[error("preferences I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failure.
    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted preference values.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PreferencesPayload {
    /// Committed palette per field name. An empty id records an explicit "none".
    #[serde(default)]
    pub selections: IndexMap<String, PaletteId>,
}

/// Preferences store backed by a JSON file.
#[derive(Debug, Default)]
pub struct UserPreferences {
    path: PathBuf,
    payload: PreferencesPayload,
    persist_to_disk: bool,
}

impl UserPreferences {
    /// Open the store at the default path (or the path named by
    /// [`PREFERENCES_PATH_ENV`]).
    pub fn new() -> Result<Self, PreferencesError> {
        Self::open(resolve_config_file(PREFERENCES_PATH_ENV, PREFERENCES_FILE_NAME))
    }

    /// Open the store rooted at `path`.
    pub fn open(path: PathBuf) -> Result<Self, PreferencesError> {
        let payload = load_payload(&path)?;
        Ok(Self {
            path,
            payload,
            persist_to_disk: true,
        })
    }

    /// Build an in-memory store used as a fallback when the config directory cannot be accessed.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
            persist_to_disk: false,
        }
    }

    /// Path to the underlying JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the palette remembered for `field`, if one was saved.
    pub fn selection(&self, field: &str) -> Option<&PaletteId> {
        self.payload.selections.get(field)
    }

    /// Record and persist the palette committed for `field`.
    pub fn set_selection(&mut self, field: &str, value: PaletteId) -> Result<(), PreferencesError> {
        self.payload.selections.insert(field.to_string(), value);
        if self.persist_to_disk {
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.payload)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn load_payload(path: &Path) -> Result<PreferencesPayload, PreferencesError> {
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(payload) => Ok(payload),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse preferences file; using defaults"
                );
                Ok(PreferencesPayload::default())
            }
        },
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(PreferencesPayload::default()),
        Err(error) => Err(PreferencesError::Io(error)),
    }
}
