//! Configuration for the inventory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::aggregate::RECENTLY_UPDATED_LIMIT;
use crate::audit::MAX_AUDIT_ENTRIES;
use crate::error::{InventoryError, Result};

/// Top-level inventory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Where the initial records come from
    pub catalog: CatalogConfig,
    /// Dashboard configuration
    pub dashboard: DashboardConfig,
    /// Audit journal configuration
    pub audit: AuditConfig,
    /// General settings
    pub general: GeneralConfig,
}

impl InventoryConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| InventoryError::Config(e.to_string()))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| InventoryError::Config(e.to_string()))
    }

    /// Read a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| InventoryError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml(&content)
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed the store with the built-in sample catalog
    pub seed_sample_data: bool,
    /// Additional catalog file appended after the sample data
    pub path: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
            path: None,
        }
    }
}

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Entries in the "recently updated" list
    pub recent_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: RECENTLY_UPDATED_LIMIT,
        }
    }
}

/// Audit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Journal entries kept before the oldest are pruned
    pub max_history_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            max_history_entries: MAX_AUDIT_ENTRIES,
        }
    }
}

/// General configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
