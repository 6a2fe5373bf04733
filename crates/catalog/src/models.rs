use std::path::Path;

use huepick_types::{Palette, PaletteId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{CatalogError, PaletteCatalog};

const EMBEDDED_PALETTES: &str = include_str!("../data/default_palettes.json");

/// On-disk catalog document.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct CatalogDocument {
    palettes: Vec<Palette>,
}

/// Ordered in-memory palette catalog.
#[derive(Debug, Default, Clone)]
pub struct PaletteStore {
    palettes: IndexMap<PaletteId, Palette>,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from palettes, rejecting duplicate or empty entries.
    pub fn from_palettes(palettes: impl IntoIterator<Item = Palette>) -> Result<Self, CatalogError> {
        let mut store = Self::new();
        for palette in palettes {
            if palette.id.is_empty() || palette.colors.is_empty() {
                return Err(CatalogError::InvalidPalette(palette.name));
            }
            if store.palettes.contains_key(&palette.id) {
                return Err(CatalogError::DuplicateId(palette.id));
            }
            store.palettes.insert(palette.id.clone(), palette);
        }
        Ok(store)
    }

    /// The palettes shipped with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_PALETTES, "<embedded>")
    }

    /// Parse a catalog document. `origin` is only used in error messages.
    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(content).map_err(|source| CatalogError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_palettes(document.palettes)
    }

    /// Load a catalog document from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&content, &path.display().to_string())?;
        debug!(path = %path.display(), palettes = store.len(), "loaded palette catalog");
        Ok(store)
    }

    /// Insert or replace a palette, keeping the position of a replaced entry.
    pub fn insert(&mut self, palette: Palette) {
        self.palettes.insert(palette.id.clone(), palette);
    }

    pub fn remove(&mut self, id: &PaletteId) -> Option<Palette> {
        self.palettes.shift_remove(id)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

impl PaletteCatalog for PaletteStore {
    fn lookup(&self, id: &PaletteId) -> Option<Palette> {
        id.non_empty().and_then(|id| self.palettes.get(id)).cloned()
    }

    fn palettes(&self) -> Vec<Palette> {
        self.palettes.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use huepick_types::HexColor;

    use super::*;

    fn palette(id: &str, name: &str) -> Palette {
        Palette::new(id, name, vec![HexColor::new(0, 0, 0)])
    }

    #[test]
    fn lookup_resolves_known_ids_only() {
        let store = PaletteStore::from_palettes([palette("p1", "One"), palette("p2", "Two")]).unwrap();
        assert_eq!(store.lookup(&PaletteId::from("p2")).map(|p| p.name), Some("Two".to_string()));
        assert!(store.lookup(&PaletteId::from("missing")).is_none());
        assert!(store.lookup(&PaletteId::empty()).is_none());
    }

    #[test]
    fn palettes_keep_catalog_order() {
        let store = PaletteStore::from_palettes([palette("b", "B"), palette("a", "A"), palette("c", "C")]).unwrap();
        let ids: Vec<String> = store.palettes().into_iter().map(|p| p.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = PaletteStore::from_palettes([palette("p1", "One"), palette("p1", "Again")]).unwrap_err();
        assert!(matches!(error, CatalogError::DuplicateId(id) if id.as_str() == "p1"));
    }

    #[test]
    fn palettes_without_colors_are_rejected() {
        let empty = Palette::new("p1", "Empty", Vec::new());
        assert!(matches!(
            PaletteStore::from_palettes([empty]),
            Err(CatalogError::InvalidPalette(_))
        ));
    }

    #[test]
    fn lookups_reflect_catalog_mutation() {
        let mut store = PaletteStore::from_palettes([palette("p1", "One")]).unwrap();
        store.insert(palette("p1", "Renamed"));
        assert_eq!(store.lookup(&PaletteId::from("p1")).map(|p| p.name), Some("Renamed".to_string()));
        store.remove(&PaletteId::from("p1"));
        assert!(store.lookup(&PaletteId::from("p1")).is_none());
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palettes.json");
        std::fs::write(&path, r#"{ "palettes": [ { "id": "p1", "name": "Bad", "colors": ["red"] } ] }"#).unwrap();
        let error = PaletteStore::load(&path).unwrap_err();
        assert!(matches!(error, CatalogError::Parse { .. }));
        assert!(error.to_string().contains("palettes.json"));
    }
}
