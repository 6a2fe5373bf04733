//! Form configuration: which palette fields the demo host presents.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use huepick_types::{PaletteId, PickerOptions, SwatchVariant};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::resolve_config_file;

/// Environment variable allowing callers to override the config file path.
pub const CONFIG_PATH_ENV: &str = "HUEPICK_CONFIG_PATH";

/// Default filename for the config document.
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("field '{0}' is configured more than once")]
    DuplicateField(String),
    #[error("config must declare at least one field")]
    NoFields,
}

/// One palette select button in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Label rendered next to the button.
    pub label: String,
    #[serde(flatten)]
    pub options: PickerOptions,
}

impl FieldConfig {
    pub fn new(label: impl Into<String>, options: PickerOptions) -> Self {
        Self {
            label: label.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub fields: Vec<FieldConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fields: vec![
                FieldConfig::new("Background", PickerOptions::new("background")),
                FieldConfig::new(
                    "Sprites",
                    PickerOptions::new("sprite")
                        .with_variant(SwatchVariant::Sprite)
                        .with_optional(Some("Default".to_string()), Some(PaletteId::from("default-sprite"))),
                ),
                FieldConfig::new("Dialogue", PickerOptions::new("ui").with_optional(None, None)),
            ],
        }
    }
}

impl AppConfig {
    /// Path used when no explicit config file is given.
    pub fn default_path() -> PathBuf {
        resolve_config_file(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
    }

    /// Read and validate the config document at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` (errors propagate) or the default path, which falls back
    /// to the built-in fields when missing or invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let path = Self::default_path();
        if !path.is_file() {
            return Ok(Self::default());
        }
        match Self::load(&path) {
            Ok(config) => Ok(config),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Invalid config file; using built-in fields");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.options.name.as_str()) {
                return Err(ConfigError::DuplicateField(field.options.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_parse_with_flattened_picker_options() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "fields": [
                { "label": "Tiles", "name": "tiles", "swatch_variant": "tile" },
                { "label": "Actors", "name": "actors", "swatch_variant": "sprite", "optional": true,
                  "optional_label": "Inherit", "optional_default_palette_id": "default-sprite" }
            ] }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.fields.len(), 2);
        let actors = &config.fields[1].options;
        assert_eq!(actors.swatch_variant, SwatchVariant::Sprite);
        assert_eq!(actors.optional_label(), "Inherit");
        assert_eq!(actors.fallback_value(), Some(&PaletteId::from("default-sprite")));
        assert!(!config.fields[0].options.optional);
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "fields": [ { "label": "A", "name": "x" }, { "label": "B", "name": "x" } ] }"#,
        )
        .unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::DuplicateField(name)) if name == "x"));
    }

    #[test]
    fn invalid_default_file_falls_back_to_built_in_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, r#"{ "fields": [] }"#).unwrap();
        let override_path = path.to_string_lossy().to_string();
        temp_env::with_var(CONFIG_PATH_ENV, Some(override_path), || {
            assert_eq!(AppConfig::resolve(None).unwrap(), AppConfig::default());
        });
        assert!(matches!(AppConfig::resolve(Some(&path)), Err(ConfigError::NoFields)));
    }
}
