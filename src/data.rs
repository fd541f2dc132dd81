// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Catalog loading
//!
//! A [`CatalogSource`] resolves the raw JSON document for a collection. The
//! loader checks its structure, runs the validator over the collection and
//! only then decodes typed records. Every failure is folded into a
//! [`DataLoadResult`]; callers never see an `Err`.

use crate::error::LoadError;
use crate::types::{Distro, Tag};
use crate::validation::{validate_distros_array, validate_tags_array, ValidationResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

const BUNDLED_TAGS: &str = include_str!("../data/tags.json");
const BUNDLED_DISTROS: &str = include_str!("../data/distros.json");

/// The two catalog collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `tags.json`, top-level field `tags`
    Tags,
    /// `distros.json`, top-level field `distros`
    Distros,
}

impl Collection {
    /// Top-level field holding the records
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Distros => "distros",
        }
    }

    /// File name of the document on disk
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Tags => "tags.json",
            Self::Distros => "distros.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Somewhere catalog documents can be resolved from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Resolve the whole document for `collection`; `Ok(None)` when absent
    async fn resolve(&self, collection: Collection) -> Result<Option<Value>, LoadError>;
}

fn parse_document(collection: Collection, text: &str) -> Result<Value, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        collection: collection.field(),
        source,
    })
}

/// Catalog documents embedded in the binary at build time
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

#[async_trait]
impl CatalogSource for BundledCatalog {
    async fn resolve(&self, collection: Collection) -> Result<Option<Value>, LoadError> {
        let text = match collection {
            Collection::Tags => BUNDLED_TAGS,
            Collection::Distros => BUNDLED_DISTROS,
        };
        parse_document(collection, text).map(Some)
    }
}

/// Catalog documents read from `tags.json` / `distros.json` in a directory
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    dir: PathBuf,
}

impl DirectoryCatalog {
    /// Create a source rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the documents are read from
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl CatalogSource for DirectoryCatalog {
    async fn resolve(&self, collection: Collection) -> Result<Option<Value>, LoadError> {
        let path = self.dir.join(collection.file_name());
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => parse_document(collection, &text).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

/// In-memory documents, mostly useful for embedding and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    /// Document for the tags collection
    pub tags: Option<Value>,
    /// Document for the distros collection
    pub distros: Option<Value>,
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn resolve(&self, collection: Collection) -> Result<Option<Value>, LoadError> {
        Ok(match collection {
            Collection::Tags => self.tags.clone(),
            Collection::Distros => self.distros.clone(),
        })
    }
}

/// Uniform outcome of a load call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataLoadResult<T> {
    /// Validated records, `None` on failure
    pub data: Option<T>,
    /// Failure message, `None` on success
    pub error: Option<String>,
    /// Always false once a load call returns
    pub loading: bool,
}

impl<T> DataLoadResult<T> {
    fn settle(collection: Collection, result: Result<T, LoadError>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
                loading: false,
            },
            Err(err) => {
                error!("Failed to load {}: {}", collection, err);
                Self {
                    data: None,
                    error: Some(err.to_string()),
                    loading: false,
                }
            }
        }
    }

    /// Convert into a `Result`, keeping the failure message
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, Some(error)) => Err(error),
            (None, None) => Err("No data loaded".to_string()),
        }
    }
}

async fn load_collection<T, S>(
    source: &S,
    collection: Collection,
    validate: fn(&Value) -> ValidationResult,
) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    S: CatalogSource + ?Sized,
{
    let structure = LoadError::Structure {
        collection: collection.field(),
    };
    let items = source
        .resolve(collection)
        .await?
        .and_then(|mut doc| doc.get_mut(collection.field()).map(Value::take))
        .filter(Value::is_array)
        .ok_or(structure)?;

    let validation = validate(&items);
    if !validation.is_valid {
        return Err(LoadError::Validation(validation.joined()));
    }

    let records: Vec<T> = serde_json::from_value(items).map_err(|source| LoadError::Decode {
        collection: collection.field(),
        source,
    })?;
    debug!("Loaded {} {}", records.len(), collection);
    Ok(records)
}

/// Load and validate the tag catalog
pub async fn load_tags<S>(source: &S) -> DataLoadResult<Vec<Tag>>
where
    S: CatalogSource + ?Sized,
{
    let result = load_collection(source, Collection::Tags, validate_tags_array).await;
    DataLoadResult::settle(Collection::Tags, result)
}

/// Load and validate the distro catalog
pub async fn load_distros<S>(source: &S) -> DataLoadResult<Vec<Distro>>
where
    S: CatalogSource + ?Sized,
{
    let result = load_collection(source, Collection::Distros, validate_distros_array).await;
    DataLoadResult::settle(Collection::Distros, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn distros_doc(records: Value) -> MemoryCatalog {
        MemoryCatalog {
            tags: None,
            distros: Some(json!({ "distros": records })),
        }
    }

    #[tokio::test]
    async fn test_bundled_catalog_loads() {
        let tags = load_tags(&BundledCatalog).await;
        let distros = load_distros(&BundledCatalog).await;

        assert_eq!(tags.error, None);
        assert_eq!(distros.error, None);
        assert!(!tags.data.unwrap().is_empty());
        assert!(!distros.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_document_is_structural() {
        let result = load_tags(&MemoryCatalog::default()).await;
        assert_eq!(result.data, None);
        assert_eq!(result.error.as_deref(), Some("Invalid tags data structure"));
        assert!(!result.loading);
    }

    #[tokio::test]
    async fn test_mistyped_collection_is_structural() {
        let source = MemoryCatalog {
            tags: Some(json!({ "tags": { "id": "gaming" } })),
            distros: Some(json!([])),
        };
        let tags = load_tags(&source).await;
        let distros = load_distros(&source).await;
        assert_eq!(tags.error.as_deref(), Some("Invalid tags data structure"));
        assert_eq!(distros.error.as_deref(), Some("Invalid distros data structure"));
    }

    #[tokio::test]
    async fn test_invalid_record_rejects_whole_catalog() {
        let source = distros_doc(json!([
            {
                "id": "mint", "name": "Linux Mint", "website": "https://linuxmint.com",
                "tag_ids": [], "priority": 1, "description": "d"
            },
            { "id": "", "name": "Broken", "website": "nope", "tag_ids": [], "priority": 2, "description": "d" }
        ]));
        let result = load_distros(&source).await;
        assert_eq!(result.data, None);
        assert!(!result.loading);
        assert_eq!(
            result.error.as_deref(),
            Some(
                "Validation failed: distros[1].id: Distro must have a valid string ID; \
                 distros[1].website: Website must be a valid URL"
            )
        );
    }

    #[tokio::test]
    async fn test_records_returned_unchanged() {
        let source = distros_doc(json!([
            { "id": "b", "name": "B", "website": "https://b.example", "tag_ids": ["x"], "priority": 3, "description": "d" },
            { "id": "a", "name": "A", "website": "https://a.example", "tag_ids": [], "priority": 1, "description": "d" }
        ]));
        let distros = load_distros(&source).await.into_result().unwrap();
        let ids: Vec<_> = distros.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(distros[0].website, "https://b.example");
    }

    #[tokio::test]
    async fn test_undecodable_tag_ids_surface_as_error() {
        let source = distros_doc(json!([
            { "id": "a", "name": "A", "website": "https://a.example", "tag_ids": [7], "priority": 1, "description": "d" }
        ]));
        let result = load_distros(&source).await;
        assert_eq!(result.data, None);
        assert!(result.error.unwrap().starts_with("Failed to decode distros"));
    }

    #[tokio::test]
    async fn test_directory_catalog() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("tags.json"),
            r##"{ "tags": [ { "id": "gaming", "name": "Gaming", "description": "d", "color": "#E53935" } ] }"##,
        )
        .unwrap();
        std::fs::write(dir.path().join("distros.json"), "{ not json").unwrap();

        let source = DirectoryCatalog::new(dir.path());
        let tags = load_tags(&source).await.into_result().unwrap();
        assert_eq!(tags[0].id, "gaming");

        let distros = load_distros(&source).await;
        assert!(distros.error.unwrap().starts_with("Failed to parse distros document"));
    }

    #[tokio::test]
    async fn test_directory_catalog_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = load_tags(&DirectoryCatalog::new(dir.path())).await;
        assert_eq!(result.error.as_deref(), Some("Invalid tags data structure"));
    }
}
