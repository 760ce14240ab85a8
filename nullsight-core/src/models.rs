//! Core data model for tabular dataset snapshots.
//!
//! A [`Dataset`] is an ordered schema of field names plus an ordered list of
//! [`Record`]s. Records are aligned with the schema when the dataset is
//! built, so every record holds exactly one [`Value`] per field and
//! downstream analytics never deal with absent keys.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{NullsightError, Result};
use crate::quality::classifier;

/// A single cell value.
///
/// Serialized untagged, so a JSON `number | string | null` maps onto it
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value; `NaN` classifies as missing
    Number(f64),
    /// Text value; blank text classifies as missing
    String(String),
    /// Null or absent
    #[default]
    Null,
}

impl Value {
    /// Returns true if this value classifies as missing.
    pub fn is_missing(&self) -> bool {
        classifier::is_missing(self)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            other => write!(f, "{}", classifier::normalize(other)),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// One row of a dataset, aligned with the dataset's field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: Vec<Value>,
}

/// Shared null returned for out-of-range reads.
static NULL_VALUE: Value = Value::Null;

impl Record {
    /// Returns the value at `field_index`, or `Null` if the index is out of range.
    pub fn get(&self, field_index: usize) -> &Value {
        self.values.get(field_index).unwrap_or(&NULL_VALUE)
    }

    /// Returns all values in schema order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An immutable, schema-aligned table snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    fields: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from positional rows.
    ///
    /// # Errors
    /// Returns `NullsightError::Dataset` if a field name is declared twice or
    /// a row does not carry exactly one value per field.
    pub fn new(fields: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        ensure_unique_fields(&fields)?;

        let width = fields.len();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                if values.len() == width {
                    Ok(Record { values })
                } else {
                    Err(NullsightError::dataset(format!(
                        "row {} has {} values but the schema declares {} fields",
                        index,
                        values.len(),
                        width
                    )))
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields, records })
    }

    /// Creates a dataset from rows keyed by field name.
    ///
    /// Fields absent from a row become `Null`. Keys that are not part of the
    /// schema are dropped.
    ///
    /// # Errors
    /// Returns `NullsightError::Dataset` if a field name is declared twice.
    pub fn from_keyed_rows<I>(fields: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = BTreeMap<String, Value>>,
    {
        ensure_unique_fields(&fields)?;

        let mut dropped_keys: usize = 0;
        let records: Vec<Record> = rows
            .into_iter()
            .map(|mut row| {
                let values = fields
                    .iter()
                    .map(|field| row.remove(field).unwrap_or(Value::Null))
                    .collect();
                dropped_keys += row.len();
                Record { values }
            })
            .collect();

        if dropped_keys > 0 {
            tracing::debug!(
                "Dropped {} values keyed by fields outside the schema",
                dropped_keys
            );
        }

        Ok(Self { fields, records })
    }

    /// Field names in schema order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of fields in the schema.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of `field` in the schema, if declared.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// Returns a new snapshot holding the records at `indices`, in that order.
    ///
    /// Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            fields: self.fields.clone(),
            records: indices
                .iter()
                .filter_map(|&index| self.records.get(index).cloned())
                .collect(),
        }
    }
}

fn ensure_unique_fields(fields: &[String]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.as_str()) {
            return Err(NullsightError::dataset(format!(
                "field '{}' is declared more than once",
                field
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::new(
            fields(&["id", "name"]),
            vec![
                vec![Value::from(1), Value::from("Alice")],
                vec![Value::from(2), Value::Null],
            ],
        )
        .unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.field_count(), 2);
        assert_eq!(dataset.field_index("name"), Some(1));
        assert_eq!(dataset.field_index("email"), None);
        assert_eq!(dataset.records()[1].get(1), &Value::Null);
    }

    #[test]
    fn test_dataset_rejects_duplicate_fields() {
        let result = Dataset::new(fields(&["id", "id"]), vec![]);
        assert!(matches!(result, Err(NullsightError::Dataset { .. })));
    }

    #[test]
    fn test_dataset_rejects_ragged_rows() {
        let result = Dataset::new(
            fields(&["id", "name"]),
            vec![vec![Value::from(1), Value::from("Alice")], vec![Value::from(2)]],
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("row 1 has 1 values"));
    }

    #[test]
    fn test_from_keyed_rows_fills_absent_fields() {
        let mut complete = BTreeMap::new();
        complete.insert("id".to_string(), Value::from(1));
        complete.insert("name".to_string(), Value::from("Alice"));

        let mut partial = BTreeMap::new();
        partial.insert("id".to_string(), Value::from(2));
        partial.insert("extra".to_string(), Value::from("ignored"));

        let dataset =
            Dataset::from_keyed_rows(fields(&["id", "name"]), vec![complete, partial]).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.records()[1].values(), &[Value::from(2), Value::Null]);
    }

    #[test]
    fn test_record_get_out_of_range_is_null() {
        let dataset = Dataset::new(fields(&["id"]), vec![vec![Value::from(1)]]).unwrap();
        assert_eq!(dataset.records()[0].get(7), &Value::Null);
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let dataset = Dataset::new(
            fields(&["id"]),
            vec![vec![Value::from(1)], vec![Value::from(2)], vec![Value::from(3)]],
        )
        .unwrap();

        let selected = dataset.select(&[2, 0, 9]);
        assert_eq!(selected.row_count(), 2);
        assert_eq!(selected.records()[0].get(0), &Value::from(3));
        assert_eq!(selected.records()[1].get(0), &Value::from(1));
        assert_eq!(selected.fields(), dataset.fields());
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[1, 2.5, "x", null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Number(1.0),
                Value::Number(2.5),
                Value::String("x".to_string()),
                Value::Null
            ]
        );
    }

    #[test]
    fn test_value_rejects_booleans() {
        let result: std::result::Result<Value, _> = serde_json::from_str("true");
        assert!(result.is_err());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(1).to_string(), "1");
        assert_eq!(Value::from(" padded ").to_string(), "padded");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(None::<i32>), Value::Null);
    }
}
