//! Catalog documents used to seed a store.
//!
//! A catalog is a YAML list of use cases in their wire shape. The built-in
//! sample catalog is compiled into the crate.

use std::path::Path;

use crate::error::{InventoryError, Result};
use crate::types::UseCase;

const SAMPLE_CATALOG: &str = include_str!("../data/sample_catalog.yaml");

/// The ten sample use cases shipped with the inventory.
pub fn sample_catalog() -> Result<Vec<UseCase>> {
    parse_catalog(SAMPLE_CATALOG)
}

/// Parse a YAML catalog document.
pub fn parse_catalog(yaml: &str) -> Result<Vec<UseCase>> {
    serde_yaml::from_str(yaml).map_err(|e| InventoryError::Catalog(e.to_string()))
}

/// Read and parse a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<UseCase>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .map_err(|e| InventoryError::Catalog(format!("{}: {}", path.display(), e)))?;
    let records = parse_catalog(&content)?;
    tracing::debug!(path = %path.display(), records = records.len(), "Loaded catalog");
    Ok(records)
}
