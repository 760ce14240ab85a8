//! Per-field missing and uniqueness statistics.
//!
//! Each field is scanned once: missing values are counted, and the
//! normalized forms of present values are collected to count distinct
//! values. Runs in `O(rows x fields)` time.

use std::collections::HashSet;

use crate::models::Dataset;

use super::classifier::{is_missing, normalize};
use super::models::{ColumnStatistics, FieldStatistics};

/// Computes missing/unique statistics for every field, in schema order.
///
/// An empty dataset yields zero counts and zero rates for every field.
pub fn compute_column_stats(dataset: &Dataset) -> ColumnStatistics {
    let total_rows = dataset.row_count() as u64;

    let fields = dataset
        .fields()
        .iter()
        .enumerate()
        .map(|(field_index, field)| {
            let mut missing_count: u64 = 0;
            let mut distinct: HashSet<String> = HashSet::new();

            for record in dataset.records() {
                let value = record.get(field_index);
                if is_missing(value) {
                    missing_count += 1;
                } else {
                    distinct.insert(normalize(value));
                }
            }

            FieldStatistics::new(field, missing_count, distinct.len() as u64, total_rows)
        })
        .collect();

    tracing::debug!(
        "Computed column statistics for {} fields over {} rows",
        dataset.field_count(),
        total_rows
    );

    ColumnStatistics::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;

    fn dataset(fields: &[&str], rows: Vec<Vec<Value>>) -> Dataset {
        Dataset::new(fields.iter().map(|f| f.to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_column_stats_reference_table() {
        let data = dataset(
            &["A", "B"],
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::Null, Value::from("x")],
                vec![Value::from(1), Value::from("")],
                vec![Value::from(2), Value::from("y")],
                vec![Value::Null, Value::from("z")],
            ],
        );

        let stats = compute_column_stats(&data);

        let a = stats.get("A").unwrap();
        assert_eq!(a.missing_count, 2);
        assert_eq!(a.present_count, 3);
        assert_eq!(a.unique_count, 2);
        assert!((a.missing_rate - 40.0).abs() < 0.001);
        assert!((a.unique_rate - 40.0).abs() < 0.001);

        let b = stats.get("B").unwrap();
        assert_eq!(b.missing_count, 1);
        assert_eq!(b.unique_count, 3);
        assert!((b.missing_rate - 20.0).abs() < 0.001);
        assert!((b.unique_rate - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_column_stats_empty_dataset() {
        let stats = compute_column_stats(&dataset(&["A", "B"], vec![]));

        assert_eq!(stats.len(), 2);
        for field in &stats {
            assert_eq!(field.missing_count, 0);
            assert_eq!(field.missing_rate, 0.0);
            assert_eq!(field.unique_rate, 0.0);
        }
    }

    #[test]
    fn test_column_stats_no_fields() {
        let stats = compute_column_stats(&dataset(&[], vec![vec![], vec![]]));
        assert!(stats.is_empty());
    }

    #[test]
    fn test_column_stats_preserves_schema_order() {
        let data = dataset(
            &["zeta", "alpha", "mid"],
            vec![vec![Value::from(1), Value::from(2), Value::from(3)]],
        );

        let stats = compute_column_stats(&data);
        let names: Vec<&str> = stats.iter().map(|field| field.field.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_column_stats_unique_counts_trimmed_values() {
        let data = dataset(
            &["name"],
            vec![
                vec![Value::from("Alice")],
                vec![Value::from("  Alice  ")],
                vec![Value::from("Bob")],
            ],
        );

        let stats = compute_column_stats(&data);
        assert_eq!(stats.get("name").unwrap().unique_count, 2);
    }

    #[test]
    fn test_column_stats_heterogeneous_values() {
        // Numeric field with a stray string spelling the same number
        let data = dataset(
            &["qty"],
            vec![
                vec![Value::from(3)],
                vec![Value::from("3")],
                vec![Value::Number(f64::NAN)],
                vec![Value::from("n/a")],
            ],
        );

        let stats = compute_column_stats(&data);
        let qty = stats.get("qty").unwrap();
        assert_eq!(qty.missing_count, 1);
        assert_eq!(qty.unique_count, 2);
        assert_eq!(qty.missing_count + qty.present_count, 4);
    }

    #[test]
    fn test_column_stats_all_missing() {
        let data = dataset(
            &["note"],
            vec![vec![Value::Null], vec![Value::from(" ")]],
        );

        let stats = compute_column_stats(&data);
        let note = stats.get("note").unwrap();
        assert_eq!(note.missing_count, 2);
        assert_eq!(note.unique_count, 0);
        assert!((note.missing_rate - 100.0).abs() < 0.001);
    }
}
