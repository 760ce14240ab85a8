//! Missingness indicator vectors.

use crate::models::Dataset;

use super::classifier::is_missing;
use super::models::MissingnessIndicators;

/// Builds one boolean vector per field marking which rows are missing.
///
/// Independent of the column statistics pass; both only read the dataset.
pub fn build_indicators(dataset: &Dataset) -> MissingnessIndicators {
    let columns: Vec<Vec<bool>> = (0..dataset.field_count())
        .map(|field_index| {
            dataset
                .records()
                .iter()
                .map(|record| is_missing(record.get(field_index)))
                .collect()
        })
        .collect();

    tracing::debug!(
        "Built missingness indicators for {} fields over {} rows",
        dataset.field_count(),
        dataset.row_count()
    );

    MissingnessIndicators::from_columns(dataset.fields().to_vec(), columns)
}
