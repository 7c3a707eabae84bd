//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the ordex pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdexConfig {
    /// Header metadata extraction configuration.
    pub master: MasterConfig,

    /// Page window configuration.
    pub pages: PageConfig,
}

/// Header (master metadata) extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterConfig {
    /// Number of opening pages scanned for header metadata.
    pub scan_pages: usize,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self { scan_pages: 3 }
    }
}

/// Page windows used by the layout-specific pipelines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// First page (0-indexed, inclusive) of the item-listing window the
    /// no-heading layout reads.
    pub item_start: usize,

    /// End page (exclusive) of that window.
    pub item_end: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            item_start: 2,
            item_end: 6,
        }
    }
}

impl OrdexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
