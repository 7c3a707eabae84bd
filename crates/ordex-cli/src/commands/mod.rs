//! CLI subcommands.

pub mod batch;
pub mod process;

use std::path::Path;

use ordex_core::OrdexConfig;

/// Load configuration from an explicit path, or fall back to defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<OrdexConfig> {
    match path {
        Some(path) => Ok(OrdexConfig::from_file(Path::new(path))?),
        None => Ok(OrdexConfig::default()),
    }
}
