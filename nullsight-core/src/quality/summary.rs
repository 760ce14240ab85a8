//! Dataset-wide completeness counters.

use crate::models::Dataset;

use super::models::{AggregateSummary, FieldMissingCount, MissingnessIndicators, percentage};

/// Summarizes row-level completeness in a single pass over the rows.
///
/// Indicators are expected to come from [`super::build_indicators`] on the
/// same dataset. Rows and fields the indicators do not cover read as
/// present.
pub fn summarize(dataset: &Dataset, indicators: &MissingnessIndicators) -> AggregateSummary {
    let rows = dataset.row_count();
    let fields = dataset.field_count();

    if indicators.row_count() != rows || indicators.fields().len() != fields {
        tracing::warn!(
            "Indicators cover {} rows x {} fields but the dataset has {} rows x {} fields",
            indicators.row_count(),
            indicators.fields().len(),
            rows,
            fields
        );
    }

    let mut field_counts: Vec<u64> = vec![0; fields];
    let mut missing_cells: u64 = 0;
    let mut rows_with_missing: u64 = 0;
    let mut single_missing_rows: u64 = 0;
    let mut multi_missing_rows: u64 = 0;

    for row in 0..rows {
        let mut missing_in_row: u64 = 0;
        for (field_index, count) in field_counts.iter_mut().enumerate() {
            if indicators.is_missing(field_index, row) {
                missing_in_row += 1;
                *count += 1;
            }
        }

        missing_cells += missing_in_row;
        match missing_in_row {
            0 => {}
            1 => {
                rows_with_missing += 1;
                single_missing_rows += 1;
            }
            _ => {
                rows_with_missing += 1;
                multi_missing_rows += 1;
            }
        }
    }

    let total_rows = rows as u64;
    let total_cells = total_rows * fields as u64;

    let field_missing_counts = dataset
        .fields()
        .iter()
        .zip(field_counts)
        .map(|(field, missing_count)| FieldMissingCount {
            field: field.clone(),
            missing_count,
        })
        .collect();

    tracing::debug!(
        "Summarized {} rows: {} with missing values, {} missing cells",
        total_rows,
        rows_with_missing,
        missing_cells
    );

    AggregateSummary {
        total_rows,
        total_fields: fields as u64,
        total_cells,
        missing_cells,
        missing_ratio: percentage(missing_cells, total_cells),
        rows_with_missing,
        rows_with_missing_ratio: percentage(rows_with_missing, total_rows),
        complete_rows: total_rows - rows_with_missing,
        single_missing_rows,
        multi_missing_rows,
        field_missing_counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use crate::quality::build_indicators;

    fn summary_for(fields: &[&str], rows: Vec<Vec<Value>>) -> AggregateSummary {
        let data = Dataset::new(fields.iter().map(|f| f.to_string()).collect(), rows).unwrap();
        summarize(&data, &build_indicators(&data))
    }

    #[test]
    fn test_summary_reference_table() {
        let summary = summary_for(
            &["A", "B"],
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::Null, Value::from("x")],
                vec![Value::from(1), Value::from("")],
                vec![Value::from(2), Value::from("y")],
                vec![Value::Null, Value::from("z")],
            ],
        );

        assert_eq!(summary.total_rows, 5);
        assert_eq!(summary.total_fields, 2);
        assert_eq!(summary.total_cells, 10);
        assert_eq!(summary.missing_cells, 3);
        assert!((summary.missing_ratio - 30.0).abs() < 0.001);
        assert_eq!(summary.rows_with_missing, 3);
        assert!((summary.rows_with_missing_ratio - 60.0).abs() < 0.001);
        assert_eq!(summary.complete_rows, 2);
        assert_eq!(summary.single_missing_rows, 3);
        assert_eq!(summary.multi_missing_rows, 0);
        assert_eq!(summary.field_missing_count("A"), Some(2));
        assert_eq!(summary.field_missing_count("B"), Some(1));
    }

    #[test]
    fn test_summary_multi_missing_rows() {
        let summary = summary_for(
            &["a", "b", "c"],
            vec![
                vec![Value::Null, Value::Null, Value::from(1)],
                vec![Value::Null, Value::Null, Value::Null],
                vec![Value::from(1), Value::from(2), Value::from(3)],
            ],
        );

        assert_eq!(summary.multi_missing_rows, 2);
        assert_eq!(summary.single_missing_rows, 0);
        assert_eq!(summary.rows_with_missing, 2);
        assert_eq!(summary.complete_rows, 1);
        assert_eq!(summary.missing_cells, 5);
    }

    #[test]
    fn test_summary_empty_dataset() {
        let summary = summary_for(&["a", "b"], vec![]);

        assert_eq!(summary.total_cells, 0);
        assert_eq!(summary.missing_ratio, 0.0);
        assert_eq!(summary.rows_with_missing_ratio, 0.0);
        assert_eq!(summary.complete_rows, 0);
        assert_eq!(summary.field_missing_counts.len(), 2);
    }

    #[test]
    fn test_summary_no_fields() {
        let summary = summary_for(&[], vec![vec![], vec![]]);

        assert_eq!(summary.total_rows, 2);
        assert_eq!(summary.total_cells, 0);
        assert_eq!(summary.missing_ratio, 0.0);
        assert_eq!(summary.complete_rows, 2);
    }

    #[test]
    fn test_summary_with_mismatched_indicators() {
        let data = Dataset::new(
            vec!["a".to_string()],
            vec![vec![Value::Null], vec![Value::Null]],
        )
        .unwrap();
        let indicators = MissingnessIndicators::from_columns(vec!["a".to_string()], vec![vec![true]]);

        let summary = summarize(&data, &indicators);
        assert_eq!(summary.missing_cells, 1);
        assert_eq!(summary.complete_rows, 1);
    }
}
