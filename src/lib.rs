// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Distro picker library - browse a curated Linux distribution catalog
//!
//! This crate provides the catalog records, the boundary validator for
//! bundled catalog documents, the loader that feeds validated records into
//! application state, and a small observable store with a derived
//! tag-filtered view of the catalog.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod store;
pub mod validation;

/// Catalog record types
pub mod types {
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Tag
    // =========================================================================

    /// A named, colored label used as a filter axis
    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Tag {
        /// Stable identifier, used for membership tests
        pub id: String,
        /// Display name
        pub name: String,
        /// Display description
        pub description: String,
        /// Hex color in `#RRGGBB` form
        pub color: String,
    }

    impl Tag {
        /// Decode the tag color into RGB components
        #[must_use]
        pub fn rgb(&self) -> Option<[u8; 3]> {
            parse_hex_color(&self.color)
        }
    }

    /// Parse a `#RRGGBB` color (either letter case) into RGB components
    #[must_use]
    pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
        let digits = color.strip_prefix('#')?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let mut rgb = [0u8; 3];
        hex::decode_to_slice(digits, &mut rgb).ok()?;
        Some(rgb)
    }

    // =========================================================================
    // Distro
    // =========================================================================

    /// A catalog entry describing one Linux distribution
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Distro {
        /// Stable identifier
        pub id: String,
        /// Display name
        pub name: String,
        /// Project website (http or https)
        pub website: String,
        /// Tag IDs this distro carries, in catalog order
        #[serde(default)]
        pub tag_ids: Vec<String>,
        /// Sort key, lower is shown first
        #[serde(serialize_with = "serialize_priority")]
        pub priority: f64,
        /// Display description
        pub description: String,
    }

    impl Distro {
        /// Check whether this distro carries the given tag
        #[must_use]
        pub fn has_tag(&self, tag_id: &str) -> bool {
            self.tag_ids.iter().any(|t| t == tag_id)
        }
    }

    /// Whole priorities are written as JSON integers, as catalogs spell them
    #[allow(
        clippy::float_cmp,
        clippy::trivially_copy_pass_by_ref,
        clippy::cast_possible_truncation
    )]
    fn serialize_priority<S: serde::Serializer>(
        priority: &f64,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        const LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53
        let p = *priority;
        if p.fract() == 0.0 && p.abs() <= LIMIT {
            serializer.serialize_i64(p as i64)
        } else {
            serializer.serialize_f64(p)
        }
    }

}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::LoadError;
    pub use crate::store::{AppState, Readable};
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
