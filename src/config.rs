// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::data::{BundledCatalog, CatalogSource, DirectoryCatalog};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Read `tags.json` / `distros.json` from here instead of the bundled copies
    pub catalog_dir: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Catalog source selected by this configuration
    #[must_use]
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog_dir {
            Some(dir) => Box::new(DirectoryCatalog::new(dir)),
            None => Box::new(BundledCatalog),
        }
    }
}

/// Default config file location for this platform
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "hyperpolymath", "distro-picker")
        .map(|d| d.config_dir().join("config.toml"))
}

/// Read configuration from a TOML file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration from an explicit path, the platform default, or defaults
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_from(path);
    }
    match default_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(Config::default()),
    }
}
