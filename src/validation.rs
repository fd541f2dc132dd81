// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Shape validation for untyped catalog records
//!
//! Records arrive as `serde_json::Value` and are only treated as
//! [`Tag`](crate::types::Tag) / [`Distro`](crate::types::Distro) once they
//! pass. Every rule is checked independently, so one record can report
//! several problems.

use crate::types::parse_hex_color;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// A single field-level problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Offending field, prefixed with `tags[N].` / `distros[N].` for arrays
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Verdict for one record or a whole collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True when `errors` is empty
    pub is_valid: bool,
    /// Every problem found, in encounter order
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Join all errors as `field: message` pairs separated by `"; "`
    #[must_use]
    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check that a URL is absolute with an `http` or `https` scheme
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}

/// Truthiness as the catalog format defines it: null, false, 0, "" are absent
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// String form used for format checks: scalars print as in JSON, arrays
/// join their elements with `,` (null elements print empty), objects collapse
/// to a fixed placeholder
fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".into(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".into(),
    }
}

fn non_empty_str<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn require_string(
    record: &Map<String, Value>,
    field: &'static str,
    message: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    if non_empty_str(record, field).is_none() {
        errors.push(ValidationError::new(field, message));
    }
}

/// Validate one tag record
#[must_use]
pub fn validate_tag(value: &Value) -> ValidationResult {
    let Some(tag) = value.as_object() else {
        return ValidationResult::from_errors(vec![ValidationError::new(
            "tag",
            "Tag must be an object",
        )]);
    };

    let mut errors = Vec::new();
    require_string(tag, "id", "Tag must have a valid string ID", &mut errors);
    require_string(tag, "name", "Tag must have a valid string name", &mut errors);
    require_string(
        tag,
        "description",
        "Tag must have a valid string description",
        &mut errors,
    );
    require_string(tag, "color", "Tag must have a valid string color", &mut errors);

    let color = tag.get("color");
    let color_ok = color.map(coerce_to_string).and_then(|c| parse_hex_color(&c)).is_some();
    if is_present(color) && !color_ok {
        errors.push(ValidationError::new("color", "Color must be a valid hex color"));
    }

    ValidationResult::from_errors(errors)
}

/// Validate one distro record
#[must_use]
pub fn validate_distro(value: &Value) -> ValidationResult {
    let Some(distro) = value.as_object() else {
        return ValidationResult::from_errors(vec![ValidationError::new(
            "distro",
            "Distro must be an object",
        )]);
    };

    let mut errors = Vec::new();
    require_string(distro, "id", "Distro must have a valid string ID", &mut errors);
    require_string(distro, "name", "Distro must have a valid string name", &mut errors);
    require_string(
        distro,
        "website",
        "Distro must have a valid string website",
        &mut errors,
    );

    let website = distro.get("website");
    let website_ok = website.map(coerce_to_string).is_some_and(|w| is_valid_url(&w));
    if is_present(website) && !website_ok {
        errors.push(ValidationError::new("website", "Website must be a valid URL"));
    }

    // Element types are not checked.
    if !distro.get("tag_ids").is_some_and(Value::is_array) {
        errors.push(ValidationError::new(
            "tag_ids",
            "Distro must have a valid array of tag IDs",
        ));
    }

    if !matches!(distro.get("priority").and_then(Value::as_f64), Some(p) if p >= 0.0) {
        errors.push(ValidationError::new(
            "priority",
            "Distro must have a valid positive priority number",
        ));
    }

    require_string(
        distro,
        "description",
        "Distro must have a valid string description",
        &mut errors,
    );

    ValidationResult::from_errors(errors)
}

fn validate_array(
    values: &Value,
    collection: &str,
    not_array: &str,
    validate: fn(&Value) -> ValidationResult,
) -> ValidationResult {
    let Some(items) = values.as_array() else {
        return ValidationResult::from_errors(vec![ValidationError::new(collection, not_array)]);
    };

    let errors = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| {
            validate(item).errors.into_iter().map(move |e| ValidationError {
                field: format!("{collection}[{index}].{}", e.field),
                message: e.message,
            })
        })
        .collect();

    ValidationResult::from_errors(errors)
}

/// Validate every element of a tags array
#[must_use]
pub fn validate_tags_array(values: &Value) -> ValidationResult {
    validate_array(values, "tags", "Tags must be an array", validate_tag)
}

/// Validate every element of a distros array
#[must_use]
pub fn validate_distros_array(values: &Value) -> ValidationResult {
    validate_array(values, "distros", "Distros must be an array", validate_distro)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_distro() -> Value {
        json!({
            "id": "mint",
            "name": "Linux Mint",
            "website": "https://linuxmint.com",
            "tag_ids": ["beginner"],
            "priority": 1,
            "description": "Cinnamon desktop"
        })
    }

    fn fields(result: &ValidationResult) -> Vec<&str> {
        result.errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_valid_tag() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": "#ABCDEF"
        }));
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_tag_bad_color_single_error() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": "blue"
        }));
        assert!(!result.is_valid);
        assert_eq!(fields(&result), vec!["color"]);
        assert_eq!(result.errors[0].message, "Color must be a valid hex color");
    }

    #[test]
    fn test_tag_lowercase_hex_accepted() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": "#abcdef"
        }));
        assert!(result.is_valid);
    }

    #[test]
    fn test_tag_collects_all_errors() {
        let result = validate_tag(&json!({ "id": "", "name": 3 }));
        assert_eq!(fields(&result), vec!["id", "name", "description", "color"]);
    }

    #[test]
    fn test_tag_non_string_color_reports_twice() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": 123
        }));
        assert_eq!(fields(&result), vec!["color", "color"]);
    }

    #[test]
    fn test_tag_single_element_color_array_passes_format_check() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": ["#ABCDEF"]
        }));
        assert_eq!(fields(&result), vec!["color"]);
        assert_eq!(result.errors[0].message, "Tag must have a valid string color");
    }

    #[test]
    fn test_tag_multi_element_color_array_reports_twice() {
        let result = validate_tag(&json!({
            "id": "m", "name": "Mint", "description": "d", "color": ["#ABCDEF", "#000000"]
        }));
        assert_eq!(fields(&result), vec!["color", "color"]);
    }

    #[test]
    fn test_coerce_to_string() {
        assert_eq!(coerce_to_string(&json!(["#ABCDEF"])), "#ABCDEF");
        assert_eq!(coerce_to_string(&json!(["a", null, 1, true])), "a,,1,true");
        assert_eq!(coerce_to_string(&json!([["x", "y"], "z"])), "x,y,z");
        assert_eq!(coerce_to_string(&json!({ "a": 1 })), "[object Object]");
        assert_eq!(coerce_to_string(&json!(123)), "123");
        assert_eq!(coerce_to_string(&json!(true)), "true");
    }

    #[test]
    fn test_tag_not_an_object() {
        for value in [json!(null), json!("tag"), json!(42), json!(["a"])] {
            let result = validate_tag(&value);
            assert!(!result.is_valid);
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].field, "tag");
        }
    }

    #[test]
    fn test_valid_distro() {
        assert!(validate_distro(&valid_distro()).is_valid);
    }

    #[test]
    fn test_distro_zero_priority_is_valid() {
        let mut distro = valid_distro();
        distro["priority"] = json!(0);
        assert!(validate_distro(&distro).is_valid);
    }

    #[test]
    fn test_distro_negative_priority() {
        let mut distro = valid_distro();
        distro["priority"] = json!(-1);
        assert_eq!(fields(&validate_distro(&distro)), vec!["priority"]);
    }

    #[test]
    fn test_distro_string_priority() {
        let mut distro = valid_distro();
        distro["priority"] = json!("1");
        assert_eq!(fields(&validate_distro(&distro)), vec!["priority"]);
    }

    #[test]
    fn test_distro_rejects_non_http_website() {
        let mut distro = valid_distro();
        distro["website"] = json!("ftp://example.org");
        let result = validate_distro(&distro);
        assert_eq!(fields(&result), vec!["website"]);
        assert_eq!(result.errors[0].message, "Website must be a valid URL");
    }

    #[test]
    fn test_distro_rejects_relative_website() {
        let mut distro = valid_distro();
        distro["website"] = json!("linuxmint.com");
        assert_eq!(fields(&validate_distro(&distro)), vec!["website"]);
    }

    #[test]
    fn test_distro_single_element_website_array_passes_url_check() {
        let mut distro = valid_distro();
        distro["website"] = json!(["https://linuxmint.com"]);
        let result = validate_distro(&distro);
        assert_eq!(fields(&result), vec!["website"]);
        assert_eq!(result.errors[0].message, "Distro must have a valid string website");
    }

    #[test]
    fn test_distro_object_website_reports_twice() {
        let mut distro = valid_distro();
        distro["website"] = json!({ "href": "https://linuxmint.com" });
        assert_eq!(fields(&validate_distro(&distro)), vec!["website", "website"]);
    }

    #[test]
    fn test_distro_tag_ids_element_types_unchecked() {
        let mut distro = valid_distro();
        distro["tag_ids"] = json!([1, null, "gaming"]);
        assert!(validate_distro(&distro).is_valid);
    }

    #[test]
    fn test_distro_missing_tag_ids() {
        let mut distro = valid_distro();
        distro.as_object_mut().unwrap().remove("tag_ids");
        assert_eq!(fields(&validate_distro(&distro)), vec!["tag_ids"]);
    }

    #[test]
    fn test_distro_field_order() {
        let result = validate_distro(&json!({}));
        assert_eq!(
            fields(&result),
            vec!["id", "name", "website", "tag_ids", "priority", "description"]
        );
    }

    #[test]
    fn test_distros_array_prefixes_index() {
        let mut bad = valid_distro();
        bad["id"] = json!("");
        let result = validate_distros_array(&json!([valid_distro(), bad]));
        assert!(!result.is_valid);
        assert_eq!(fields(&result), vec!["distros[1].id"]);
        assert_eq!(result.errors[0].message, "Distro must have a valid string ID");
    }

    #[test]
    fn test_array_checks_every_element() {
        let result = validate_tags_array(&json!([
            { "id": "a", "name": "A", "description": "d", "color": "red" },
            { "id": "b", "name": "B", "description": "d", "color": "#000000" },
            "oops"
        ]));
        assert_eq!(fields(&result), vec!["tags[0].color", "tags[2].tag"]);
    }

    #[test]
    fn test_array_rejects_non_array() {
        let result = validate_tags_array(&json!({ "tags": [] }));
        assert_eq!(
            result.errors,
            vec![ValidationError::new("tags", "Tags must be an array")]
        );

        let result = validate_distros_array(&json!(null));
        assert_eq!(result.errors[0].field, "distros");
    }

    #[test]
    fn test_empty_array_is_valid() {
        assert!(validate_distros_array(&json!([])).is_valid);
    }

    #[test]
    fn test_joined_message() {
        let result = validate_tag(&json!({ "id": "x", "name": "X", "description": "d" }));
        assert_eq!(result.joined(), "color: Tag must have a valid string color");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://fedoraproject.org/workstation"));
        assert!(is_valid_url("http://example.org"));
        assert!(!is_valid_url("javascript:alert(1)"));
        assert!(!is_valid_url("not a url"));
    }
}
