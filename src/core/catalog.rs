//! Region catalog - the built-in state to city table used by the address step

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

const REGIONS_FILE: &str = "regions.yaml";

/// Errors raised while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Embedded region data not found: {0}")]
    NotFound(String),

    #[error("Region data is not valid UTF-8")]
    Encoding,

    #[error("Failed to parse region data: {0}")]
    Parse(String),
}

/// One state and its known cities
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    pub state: String,
    pub cities: Vec<String>,
}

/// Read-only mapping from state name to its ordered list of cities
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl RegionCatalog {
    /// Load the catalog shipped inside the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        let file = EmbeddedData::get(REGIONS_FILE)
            .ok_or_else(|| CatalogError::NotFound(REGIONS_FILE.to_string()))?;
        let text = std::str::from_utf8(&file.data).map_err(|_| CatalogError::Encoding)?;
        Self::from_yaml(text)
    }

    /// Parse a catalog from YAML (a list of `{state, cities}` entries)
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        let regions: Vec<Region> =
            serde_yml::from_str(text).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(Self::from_regions(regions))
    }

    pub fn from_regions(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// State names in catalog order
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.state.as_str())
    }

    pub fn contains_state(&self, state: &str) -> bool {
        self.regions.iter().any(|r| r.state == state)
    }

    /// Cities of a state; an unknown state yields an empty list
    pub fn cities(&self, state: &str) -> &[String] {
        self.regions
            .iter()
            .find(|r| r.state == state)
            .map(|r| r.cities.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_city(&self, state: &str, city: &str) -> bool {
        self.cities(state).iter().any(|c| c == city)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = RegionCatalog::builtin().unwrap();
        let states: Vec<&str> = catalog.states().collect();
        assert_eq!(states, vec!["Maharashtra", "Delhi", "Karnataka"]);
        assert_eq!(catalog.cities("Karnataka").len(), 10);
        assert_eq!(catalog.cities("Karnataka")[0], "Bangalore");
    }

    #[test]
    fn test_unknown_state_has_no_cities() {
        let catalog = RegionCatalog::builtin().unwrap();
        assert!(catalog.cities("Goa").is_empty());
        assert!(!catalog.contains_state("Goa"));
    }

    #[test]
    fn test_has_city() {
        let catalog = RegionCatalog::builtin().unwrap();
        assert!(catalog.has_city("Delhi", "Shahdara"));
        assert!(!catalog.has_city("Karnataka", "Shahdara"));
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        let err = RegionCatalog::from_yaml("state: [unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
