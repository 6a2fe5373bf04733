//! Palette catalog for huepick.
//!
//! The picker never owns palette data; it resolves identifiers through the
//! [`PaletteCatalog`] trait on every render. [`PaletteStore`] is the ordered,
//! in-memory implementation backed either by the embedded default palettes or
//! by a JSON catalog file.

pub mod config;
pub mod models;

use std::fmt::Debug;
use std::path::PathBuf;

use huepick_types::{Palette, PaletteId};
use thiserror::Error;

pub use config::{CATALOG_PATH_ENV, default_catalog_path, load_catalog};
pub use models::PaletteStore;

/// Read-only palette lookup consumed by the picker.
pub trait PaletteCatalog: Debug {
    /// Resolve a palette by identifier. The empty identifier never resolves.
    fn lookup(&self, id: &PaletteId) -> Option<Palette>;

    /// Every palette in catalog order.
    fn palettes(&self) -> Vec<Palette>;
}

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read palette catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse palette catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("palette '{0}' is defined more than once")]
    DuplicateId(PaletteId),
    #[error("palette '{0}' has an empty identifier or no colors")]
    InvalidPalette(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn embedded_catalog_non_empty_and_unique_ids() {
        let store = PaletteStore::embedded().expect("load embedded palettes");
        let palettes = store.palettes();
        assert!(!palettes.is_empty(), "embedded catalog should not be empty");
        let ids: HashSet<_> = palettes.iter().map(|palette| palette.id.clone()).collect();
        assert_eq!(ids.len(), palettes.len());
        assert!(palettes.iter().all(|palette| !palette.colors.is_empty()));
    }
}
