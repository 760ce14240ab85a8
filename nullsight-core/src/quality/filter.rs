//! Row filtering by missing and uniqueness predicates.
//!
//! The missing filter and the uniqueness filter are independent toggles
//! combined with AND. Neither knows about the other; any "one at a time"
//! policy belongs to the caller. Output keeps original row order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Record};

use super::classifier::{is_missing, normalize};
use super::models::RowPreview;

/// Keeps rows with a missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingFilter {
    /// Whether the filter applies
    pub enabled: bool,
    /// Field to test; `None` keeps rows missing in any field
    pub target_field: Option<String>,
}

/// Keeps rows whose value occurs exactly once in the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueFilter {
    /// Whether the filter applies
    pub enabled: bool,
    /// Field to test; the filter is inert without one
    pub target_field: Option<String>,
}

/// AND-combination of a missing filter and a uniqueness filter.
///
/// The default predicate has both filters disabled and keeps every row.
///
/// # Example
/// ```rust
/// use nullsight_core::quality::FilterPredicate;
///
/// let predicate = FilterPredicate::new()
///     .with_missing_in("email")
///     .with_unique_in("user_id");
/// assert!(predicate.is_active());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Missing-value filter
    pub missing_filter: MissingFilter,
    /// Uniqueness filter
    pub unique_filter: UniqueFilter,
}

impl FilterPredicate {
    /// Creates a predicate with both filters disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to keep rows with a missing value in any field.
    pub fn with_missing_any(mut self) -> Self {
        self.missing_filter = MissingFilter {
            enabled: true,
            target_field: None,
        };
        self
    }

    /// Builder method to keep rows whose `field` is missing.
    pub fn with_missing_in(mut self, field: impl Into<String>) -> Self {
        self.missing_filter = MissingFilter {
            enabled: true,
            target_field: Some(field.into()),
        };
        self
    }

    /// Builder method to keep rows whose `field` value is unique.
    pub fn with_unique_in(mut self, field: impl Into<String>) -> Self {
        self.unique_filter = UniqueFilter {
            enabled: true,
            target_field: Some(field.into()),
        };
        self
    }

    /// Returns true if at least one filter will restrict rows.
    pub fn is_active(&self) -> bool {
        self.missing_filter.enabled
            || (self.unique_filter.enabled && self.unique_filter.target_field.is_some())
    }
}

/// Missing-filter target resolved against the schema.
enum MissingTarget {
    AnyField,
    Field(usize),
}

/// Returns the indices of rows matching `predicate`, in original order.
///
/// A filter whose target field is not part of the schema matches nothing.
pub fn matching_rows(dataset: &Dataset, predicate: &FilterPredicate) -> Vec<usize> {
    let missing_target = if predicate.missing_filter.enabled {
        Some(match &predicate.missing_filter.target_field {
            None => MissingTarget::AnyField,
            Some(field) => match dataset.field_index(field) {
                Some(index) => MissingTarget::Field(index),
                None => {
                    tracing::debug!("Missing filter targets undeclared field '{}'", field);
                    return Vec::new();
                }
            },
        })
    } else {
        None
    };

    let unique_target = match &predicate.unique_filter {
        UniqueFilter {
            enabled: true,
            target_field: Some(field),
        } => match dataset.field_index(field) {
            Some(index) => Some((index, value_frequencies(dataset, index))),
            None => {
                tracing::debug!("Uniqueness filter targets undeclared field '{}'", field);
                return Vec::new();
            }
        },
        _ => None,
    };

    let matches: Vec<usize> = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            let passes_missing = match &missing_target {
                None => true,
                Some(MissingTarget::AnyField) => record.values().iter().any(is_missing),
                Some(MissingTarget::Field(index)) => is_missing(record.get(*index)),
            };

            passes_missing
                && unique_target.as_ref().is_none_or(|(index, frequencies)| {
                    let value = record.get(*index);
                    !is_missing(value) && frequencies.get(&normalize(value)) == Some(&1)
                })
        })
        .map(|(index, _)| index)
        .collect();

    tracing::debug!(
        "Filter matched {} of {} rows",
        matches.len(),
        dataset.row_count()
    );

    matches
}

/// Returns the records matching `predicate`, in original order.
pub fn filter_records<'a>(dataset: &'a Dataset, predicate: &FilterPredicate) -> Vec<&'a Record> {
    matching_rows(dataset, predicate)
        .into_iter()
        .filter_map(|index| dataset.records().get(index))
        .collect()
}

/// Takes the first `limit` matching rows as previews for table rendering.
pub fn preview_rows(dataset: &Dataset, row_indices: &[usize], limit: usize) -> Vec<RowPreview> {
    row_indices
        .iter()
        .take(limit)
        .filter_map(|&row_index| {
            dataset.records().get(row_index).map(|record| RowPreview {
                row_index,
                values: record.values().to_vec(),
            })
        })
        .collect()
}

/// Counts normalized present values of one field over the whole dataset.
fn value_frequencies(dataset: &Dataset, field_index: usize) -> HashMap<String, u64> {
    let mut frequencies: HashMap<String, u64> = HashMap::new();
    for record in dataset.records() {
        let value = record.get(field_index);
        if !is_missing(value) {
            *frequencies.entry(normalize(value)).or_insert(0) += 1;
        }
    }
    frequencies
}
