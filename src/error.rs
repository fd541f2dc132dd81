// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for catalog loading and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while resolving or validating a catalog document.
///
/// These never escape the loader boundary: `data::load_tags` and
/// `data::load_distros` fold them into a `DataLoadResult`.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Document absent, or its top-level collection missing or not an array
    #[error("Invalid {collection} data structure")]
    Structure {
        /// Name of the expected top-level field
        collection: &'static str,
    },

    /// One or more records failed validation; holds the joined messages
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The catalog document is not well-formed JSON
    #[error("Failed to parse {collection} document: {source}")]
    Parse {
        /// Name of the collection being read
        collection: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Validated records could not be decoded into typed records
    #[error("Failed to decode {collection}: {source}")]
    Decode {
        /// Name of the collection being decoded
        collection: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Reading a catalog document from disk failed
    #[error("IO error when reading `{}`", .path.display())]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    /// Config file is not valid TOML for `Config`
    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}
