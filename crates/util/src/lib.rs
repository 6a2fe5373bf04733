//! Configuration, preferences, and path helpers shared by the huepick crates.

pub mod app_config;
mod path_processing;
pub mod preferences;

pub use app_config::{AppConfig, CONFIG_PATH_ENV, ConfigError, FieldConfig};
pub use path_processing::{expand_tilde, huepick_config_dir, resolve_config_file};
pub use preferences::{PREFERENCES_PATH_ENV, PreferencesError, UserPreferences};
