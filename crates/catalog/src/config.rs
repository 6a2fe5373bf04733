use std::path::{Path, PathBuf};

use huepick_util::resolve_config_file;
use tracing::info;

use crate::{CatalogError, PaletteStore};

/// Environment variable naming a catalog file to load instead of the default.
pub const CATALOG_PATH_ENV: &str = "HUEPICK_CATALOG_PATH";

/// Get the default path for a user palette catalog.
pub fn default_catalog_path() -> PathBuf {
    resolve_config_file(CATALOG_PATH_ENV, "palettes.json")
}

/// Load the catalog from `explicit` when given, otherwise from the default
/// path when a file exists there, otherwise the embedded palettes.
pub fn load_catalog(explicit: Option<&Path>) -> Result<PaletteStore, CatalogError> {
    if let Some(path) = explicit {
        return PaletteStore::load(path);
    }
    let default_path = default_catalog_path();
    if default_path.is_file() {
        return PaletteStore::load(&default_path);
    }
    info!("no palette catalog file found; using embedded palettes");
    PaletteStore::embedded()
}

#[cfg(test)]
mod tests {
    use crate::PaletteCatalog;
    use huepick_types::PaletteId;

    use super::*;

    #[test]
    fn env_override_selects_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        std::fs::write(&path, r##"{ "palettes": [ { "id": "only", "name": "Only", "colors": ["#123456"] } ] }"##)
            .unwrap();
        let override_path = path.to_string_lossy().to_string();

        temp_env::with_var(CATALOG_PATH_ENV, Some(override_path), || {
            assert_eq!(default_catalog_path(), path);
            let store = load_catalog(None).expect("catalog loads");
            assert_eq!(store.len(), 1);
            assert!(store.lookup(&PaletteId::from("only")).is_some());
        });
    }

    #[test]
    fn missing_default_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json").to_string_lossy().to_string();
        temp_env::with_var(CATALOG_PATH_ENV, Some(missing), || {
            let store = load_catalog(None).expect("embedded catalog loads");
            assert!(!store.is_empty());
        });
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_catalog(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(error, CatalogError::Io { .. }));
    }
}
