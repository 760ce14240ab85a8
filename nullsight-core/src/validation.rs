//! JSON Schema validation for dataset documents.
//!
//! Datasets cross the process boundary as a JSON document:
//!
//! ```json
//! {
//!   "format_version": "1.0",
//!   "name": "customers",
//!   "fields": ["id", "email"],
//!   "records": [{"id": 1, "email": "a@example.com"}, {"id": 2}]
//! }
//! ```
//!
//! The structure is checked against an embedded JSON Schema compiled once
//! per process. Checks the schema cannot express (supported version, record
//! keys declared in `fields`) run alongside it. A record that omits a field
//! holds `null` for it.
//!
//! # Example
//! ```rust
//! use nullsight_core::validation::parse_dataset_document;
//!
//! let dataset = parse_dataset_document(
//!     r#"{"format_version": "1.0", "fields": ["a"], "records": [{"a": 1}, {}]}"#,
//! )?;
//! assert_eq!(dataset.row_count(), 2);
//! # Ok::<(), nullsight_core::validation::ValidationError>(())
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Dataset, Value as CellValue};

/// Dataset document validation errors with field-level reporting
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Schema compilation failed during initialization
    #[error("JSON Schema compilation failed: {message}")]
    SchemaCompilation { message: String },

    /// Validation failed with specific field errors
    #[error("Dataset validation failed with {error_count} errors: {errors:?}")]
    ValidationFailed {
        error_count: usize,
        errors: Vec<String>,
    },

    /// Unsupported format version detected
    #[error("Unsupported format version '{version}'. Supported versions: {supported:?}")]
    UnsupportedVersion {
        version: String,
        supported: Vec<String>,
    },

    /// A record carries a key that is not a declared field
    #[error("Record {record} uses undeclared field '{field}'")]
    UndeclaredField { record: usize, field: String },

    /// JSON parsing error
    #[error("JSON parsing failed: {source}")]
    JsonParsing {
        #[from]
        source: serde_json::Error,
    },
}

/// Supported format versions for backward compatibility
const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

/// Embedded JSON Schema for v1.0 dataset documents
const SCHEMA_V1_0: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Nullsight Dataset Document v1.0",
  "type": "object",
  "required": ["format_version", "fields", "records"],
  "additionalProperties": false,
  "properties": {
    "format_version": {
      "type": "string",
      "pattern": "^1\\.0$"
    },
    "name": { "type": "string" },
    "fields": {
      "type": "array",
      "items": { "type": "string" },
      "uniqueItems": true
    },
    "records": {
      "type": "array",
      "items": {
        "type": "object",
        "additionalProperties": { "type": ["number", "string", "null"] }
      }
    }
  }
}"#;

/// Compiled JSON Schema instance (initialized once)
static COMPILED_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Wire shape of a dataset document once it has passed validation
#[derive(Debug, Deserialize)]
struct DatasetDocument {
    fields: Vec<String>,
    records: Vec<BTreeMap<String, CellValue>>,
}

/// Initialize and compile the JSON Schema for validation
///
/// Compiles the embedded JSON Schema and caches it for reuse. Validation
/// calls this on first use; binaries may call it at startup to fail early.
///
/// # Errors
/// Returns `ValidationError::SchemaCompilation` if the embedded schema is invalid.
pub fn initialize_dataset_validator() -> Result<(), ValidationError> {
    if COMPILED_SCHEMA.get().is_some() {
        return Ok(());
    }

    let schema_json: Value =
        serde_json::from_str(SCHEMA_V1_0).map_err(|e| ValidationError::SchemaCompilation {
            message: format!("Failed to parse embedded schema: {}", e),
        })?;

    let compiled = jsonschema::validator_for(&schema_json).map_err(|e| {
        ValidationError::SchemaCompilation {
            message: format!("Schema compilation error: {}", e),
        }
    })?;

    // Another thread may have won the race; either copy is identical
    let _ = COMPILED_SCHEMA.set(compiled);

    Ok(())
}

fn compiled_schema() -> Result<&'static Validator, ValidationError> {
    initialize_dataset_validator()?;
    COMPILED_SCHEMA
        .get()
        .ok_or_else(|| ValidationError::SchemaCompilation {
            message: "Schema validator not initialized".to_string(),
        })
}

/// Validate a dataset document against the JSON Schema
///
/// Performs, in order:
/// - Format version compatibility checking
/// - JSON Schema structure validation (every schema error is reported)
/// - Record keys checked against the declared fields
///
/// # Errors
/// Returns detailed validation errors if the document is malformed.
pub fn validate_dataset_document(json_value: &Value) -> Result<(), ValidationError> {
    let schema = compiled_schema()?;

    validate_format_version(json_value)?;

    let errors: Vec<String> = schema
        .iter_errors(json_value)
        .map(|error| error.to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ValidationError::ValidationFailed {
            error_count: errors.len(),
            errors,
        });
    }

    validate_record_keys(json_value)
}

/// Validate and parse a dataset document into a [`Dataset`]
///
/// # Errors
/// Returns `ValidationError::JsonParsing` for malformed JSON, or any error
/// from [`validate_dataset_document`].
pub fn parse_dataset_document(text: &str) -> Result<Dataset, ValidationError> {
    let json_value: Value = serde_json::from_str(text)?;
    validate_dataset_document(&json_value)?;

    let document: DatasetDocument = serde_json::from_value(json_value)?;
    let dataset = Dataset::from_keyed_rows(document.fields, document.records).map_err(|e| {
        ValidationError::ValidationFailed {
            error_count: 1,
            errors: vec![e.to_string()],
        }
    })?;

    tracing::debug!(
        "Parsed dataset document with {} rows and {} fields",
        dataset.row_count(),
        dataset.field_count()
    );

    Ok(dataset)
}

/// Validate format version compatibility
///
/// Ensures the format_version field is present and supported.
fn validate_format_version(json_value: &Value) -> Result<(), ValidationError> {
    let version = json_value
        .get("format_version")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ValidationError::ValidationFailed {
            error_count: 1,
            errors: vec!["Missing required field 'format_version'".to_string()],
        })?;

    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ValidationError::UnsupportedVersion {
            version: version.to_string(),
            supported: SUPPORTED_VERSIONS.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

/// Reject record keys that are not declared in `fields`
fn validate_record_keys(json_value: &Value) -> Result<(), ValidationError> {
    let declared: Vec<&str> = json_value
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| fields.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let records = json_value
        .get("records")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (index, record) in records.iter().enumerate() {
        if let Some(object) = record.as_object()
            && let Some(key) = object.keys().find(|key| !declared.contains(&key.as_str()))
        {
            return Err(ValidationError::UndeclaredField {
                record: index,
                field: key.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
