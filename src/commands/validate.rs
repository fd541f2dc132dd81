// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Validate command - check catalog documents without loading them

use super::Output;
use crate::config::Config;
use crate::data::Collection;
use crate::validation::{validate_distros_array, validate_tags_array, ValidationResult};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Serialize)]
struct Report {
    collection: &'static str,
    #[serde(flatten)]
    result: ValidationResult,
}

/// Run the validate command
///
/// Explicit files take precedence; otherwise the configured catalog is checked.
pub async fn run(
    config: &Config,
    tags: Option<PathBuf>,
    distros: Option<PathBuf>,
    output: Output,
) -> Result<()> {
    let source = config.catalog_source();
    let mut reports = Vec::new();

    for (collection, path) in [(Collection::Tags, tags), (Collection::Distros, distros)] {
        let document = match path {
            Some(path) => read_document(&path).await?,
            None => source
                .resolve(collection)
                .await
                .with_context(|| format!("Failed to resolve {collection}"))?,
        };
        reports.push(check(collection, document.as_ref()));
    }

    let invalid: usize = reports.iter().map(|r| r.result.errors.len()).sum();

    if output.json {
        let json = serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        for report in &reports {
            if report.result.is_valid {
                println!("{}: ok", report.collection);
            } else {
                println!("{}: {} problem(s)", report.collection, report.result.errors.len());
                for error in &report.result.errors {
                    println!("  {error}");
                }
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("Validation failed with {} problem(s)", invalid);
    }
    info!("Catalog is valid");
    Ok(())
}

async fn read_document(path: &Path) -> Result<Option<Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(value))
}

fn check(collection: Collection, document: Option<&Value>) -> Report {
    let field = collection.field();
    let items = document.and_then(|d| d.get(field)).unwrap_or(&Value::Null);
    let result = match collection {
        Collection::Tags => validate_tags_array(items),
        Collection::Distros => validate_distros_array(items),
    };
    Report {
        collection: field,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BundledCatalog, CatalogSource, DirectoryCatalog};
    use serde_json::json;

    #[test]
    fn test_check_missing_collection() {
        let report = check(Collection::Tags, Some(&json!({ "other": [] })));
        assert!(!report.result.is_valid);
        assert_eq!(report.result.errors[0].field, "tags");
    }

    #[test]
    fn test_check_valid_document() {
        let doc = json!({ "tags": [
            { "id": "kde", "name": "KDE", "description": "d", "color": "#1D99F3" }
        ]});
        assert!(check(Collection::Tags, Some(&doc)).result.is_valid);
    }

    #[tokio::test]
    async fn test_bundled_catalog_is_valid() {
        for collection in [Collection::Tags, Collection::Distros] {
            let doc = BundledCatalog.resolve(collection).await.unwrap();
            assert!(check(collection, doc.as_ref()).result.is_valid);
        }
    }

    #[tokio::test]
    async fn test_directory_catalog_reports_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("distros.json"),
            r#"{ "distros": [ { "id": "x", "priority": -1 } ] }"#,
        )
        .unwrap();
        let doc = DirectoryCatalog::new(dir.path())
            .resolve(Collection::Distros)
            .await
            .unwrap();
        let report = check(Collection::Distros, doc.as_ref());
        assert!(report.result.errors.iter().any(|e| e.field == "distros[0].priority"));
    }
}
