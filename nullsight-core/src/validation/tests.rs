//! Tests for dataset document validation.
//!
//! These tests verify that validation accepts well-formed documents,
//! reports structural errors, rejects unsupported versions and undeclared
//! record keys, and builds schema-aligned datasets.

use super::*;
use serde_json::json;

#[test]
fn test_schema_initialization_success() {
    assert!(initialize_dataset_validator().is_ok());
    // Second call is a no-op
    assert!(initialize_dataset_validator().is_ok());
}

#[test]
fn test_valid_minimal_document_passes() {
    let document = json!({
        "format_version": "1.0",
        "fields": [],
        "records": []
    });

    assert!(validate_dataset_document(&document).is_ok());
}

#[test]
fn test_valid_document_with_mixed_values_passes() {
    let document = json!({
        "format_version": "1.0",
        "name": "customers",
        "fields": ["id", "email", "score"],
        "records": [
            {"id": 1, "email": "a@example.com", "score": 9.5},
            {"id": 2, "email": null},
            {"id": "3", "email": "  ", "score": 0}
        ]
    });

    assert!(validate_dataset_document(&document).is_ok());
}

#[test]
fn test_missing_format_version_fails() {
    let document = json!({"fields": [], "records": []});

    let result = validate_dataset_document(&document);
    assert!(matches!(
        result,
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_unsupported_version_fails() {
    let document = json!({
        "format_version": "2.0",
        "fields": [],
        "records": []
    });

    match validate_dataset_document(&document) {
        Err(ValidationError::UnsupportedVersion { version, supported }) => {
            assert_eq!(version, "2.0");
            assert_eq!(supported, vec!["1.0".to_string()]);
        }
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
}

#[test]
fn test_missing_records_fails() {
    let document = json!({"format_version": "1.0", "fields": ["a"]});

    assert!(matches!(
        validate_dataset_document(&document),
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_duplicate_fields_fail() {
    let document = json!({
        "format_version": "1.0",
        "fields": ["a", "a"],
        "records": []
    });

    assert!(matches!(
        validate_dataset_document(&document),
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_boolean_values_fail() {
    let document = json!({
        "format_version": "1.0",
        "fields": ["active"],
        "records": [{"active": true}]
    });

    assert!(matches!(
        validate_dataset_document(&document),
        Err(ValidationError::ValidationFailed { .. })
    ));
}

#[test]
fn test_nested_values_fail() {
    let document = json!({
        "format_version": "1.0",
        "fields": ["meta", "tags"],
        "records": [{"meta": {"k": "v"}, "tags": ["a"]}]
    });

    match validate_dataset_document(&document) {
        Err(ValidationError::ValidationFailed { error_count, errors }) => {
            assert_eq!(error_count, errors.len());
            assert!(error_count >= 1);
        }
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn test_non_object_record_fails() {
    let document = json!({
        "format_version": "1.0",
        "fields": ["a"],
        "records": [[1]]
    });

    assert!(validate_dataset_document(&document).is_err());
}

#[test]
fn test_unknown_top_level_key_fails() {
    let document = json!({
        "format_version": "1.0",
        "fields": [],
        "records": [],
        "rows": []
    });

    assert!(validate_dataset_document(&document).is_err());
}

#[test]
fn test_undeclared_record_key_fails() {
    let document = json!({
        "format_version": "1.0",
        "fields": ["a"],
        "records": [{"a": 1}, {"a": 2, "b": 3}]
    });

    match validate_dataset_document(&document) {
        Err(ValidationError::UndeclaredField { record, field }) => {
            assert_eq!(record, 1);
            assert_eq!(field, "b");
        }
        other => panic!("expected UndeclaredField, got {:?}", other),
    }
}

#[test]
fn test_parse_builds_aligned_dataset() {
    let text = r#"{
        "format_version": "1.0",
        "fields": ["A", "B"],
        "records": [
            {"A": 1, "B": "x"},
            {"B": "x"},
            {"A": 1, "B": ""}
        ]
    }"#;

    let dataset = parse_dataset_document(text).unwrap();

    assert_eq!(dataset.fields(), &["A".to_string(), "B".to_string()]);
    assert_eq!(dataset.row_count(), 3);
    assert_eq!(dataset.records()[1].get(0), &CellValue::Null);
    assert_eq!(
        dataset.records()[2].get(1),
        &CellValue::String(String::new())
    );
}

#[test]
fn test_parse_malformed_json_fails() {
    let result = parse_dataset_document("{ not json");
    assert!(matches!(result, Err(ValidationError::JsonParsing { .. })));
}

#[test]
fn test_error_messages_are_descriptive() {
    let error = ValidationError::UndeclaredField {
        record: 4,
        field: "extra".to_string(),
    };
    assert_eq!(error.to_string(), "Record 4 uses undeclared field 'extra'");
}
