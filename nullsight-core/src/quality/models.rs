//! Data quality result models.
//!
//! Every structure here is a value derived fresh from one dataset snapshot.
//! Per-field collections keep schema order and serialize as JSON objects
//! whose keys appear in that order.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::Value;

/// Returns `part / whole * 100`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 * 100.0 / whole as f64).clamp(0.0, 100.0)
    }
}

/// Missing and uniqueness statistics for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatistics {
    /// Field name
    pub field: String,
    /// Rows whose value is missing
    pub missing_count: u64,
    /// Rows whose value is present
    pub present_count: u64,
    /// Distinct normalized values among present values
    pub unique_count: u64,
    /// Missing rows as a percentage of all rows (0-100)
    pub missing_rate: f64,
    /// Distinct values as a percentage of all rows (0-100)
    pub unique_rate: f64,
}

impl FieldStatistics {
    /// Creates field statistics from raw counts.
    ///
    /// `unique_rate` is relative to `total_rows`, not to the present rows:
    /// a half-empty column of distinct values scores 50, not 100.
    pub fn new(
        field: impl Into<String>,
        missing_count: u64,
        unique_count: u64,
        total_rows: u64,
    ) -> Self {
        let field = field.into();

        if missing_count > total_rows || unique_count > total_rows {
            tracing::warn!(
                "Field statistics anomaly: missing_count ({}) or unique_count ({}) exceeds total ({}) for field '{}'",
                missing_count,
                unique_count,
                total_rows,
                field
            );
        }

        Self {
            field,
            missing_count,
            present_count: total_rows.saturating_sub(missing_count),
            unique_count,
            missing_rate: percentage(missing_count, total_rows),
            unique_rate: percentage(unique_count, total_rows),
        }
    }
}

/// Per-field statistics in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnStatistics {
    fields: Vec<FieldStatistics>,
}

impl ColumnStatistics {
    pub(crate) fn new(fields: Vec<FieldStatistics>) -> Self {
        Self { fields }
    }

    /// Statistics for `field`, if it is part of the schema.
    pub fn get(&self, field: &str) -> Option<&FieldStatistics> {
        self.fields.iter().find(|stats| stats.field == field)
    }

    /// Iterates statistics in schema order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldStatistics> {
        self.fields.iter()
    }

    /// Number of fields covered.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are covered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a ColumnStatistics {
    type Item = &'a FieldStatistics;
    type IntoIter = std::slice::Iter<'a, FieldStatistics>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for ColumnStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for stats in &self.fields {
            map.serialize_entry(&stats.field, stats)?;
        }
        map.end()
    }
}

/// Per-field boolean vectors marking which rows are missing.
///
/// Column `f`, position `i` is true iff row `i`'s value for field `f`
/// classifies as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingnessIndicators {
    fields: Vec<String>,
    columns: Vec<Vec<bool>>,
    row_count: usize,
}

impl MissingnessIndicators {
    /// Creates indicators from raw columns, one per field.
    ///
    /// Fields without a column get an empty one. A column shorter than the
    /// longest column reads as present past its end.
    pub fn from_columns(fields: Vec<String>, mut columns: Vec<Vec<bool>>) -> Self {
        if columns.len() != fields.len() {
            tracing::warn!(
                "Indicator column count ({}) does not match field count ({})",
                columns.len(),
                fields.len()
            );
            columns.resize_with(fields.len(), Vec::new);
        }
        let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            fields,
            columns,
            row_count,
        }
    }

    /// Field names in schema order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of rows the indicators span.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Indicator column for `field`, if it is part of the schema.
    pub fn column(&self, field: &str) -> Option<&[bool]> {
        let index = self.fields.iter().position(|f| f == field)?;
        self.column_at(index)
    }

    /// Indicator column at schema position `field_index`.
    pub fn column_at(&self, field_index: usize) -> Option<&[bool]> {
        self.columns.get(field_index).map(Vec::as_slice)
    }

    /// Returns true if row `row` is missing for the field at `field_index`.
    pub fn is_missing(&self, field_index: usize, row: usize) -> bool {
        self.column_at(field_index)
            .and_then(|column| column.get(row).copied())
            .unwrap_or(false)
    }

    /// Number of missing rows for the field at `field_index`.
    pub fn missing_count(&self, field_index: usize) -> u64 {
        self.column_at(field_index)
            .map_or(0, |column| column.iter().filter(|&&missing| missing).count() as u64)
    }

    /// Iterates `(field, column)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[bool])> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}

impl Serialize for MissingnessIndicators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, column) in self.iter() {
            map.serialize_entry(field, column)?;
        }
        map.end()
    }
}

/// A field together with its raw missing count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMissingCount {
    /// Field name
    pub field: String,
    /// Rows whose value is missing
    pub missing_count: u64,
}

/// Jaccard similarity of the missingness of two fields.
///
/// `field_a` always precedes `field_b` in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSimilarity {
    /// Earlier field in schema order
    pub field_a: String,
    /// Later field in schema order
    pub field_b: String,
    /// Rows where both are missing over rows where either is missing (0.0-1.0)
    pub jaccard: f64,
}

/// Rankings of the most problematic fields and field pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Fields with the most missing values, descending
    pub top_fields: Vec<FieldMissingCount>,
    /// Pairs with the highest Jaccard similarity, descending
    pub top_pairs: Vec<PairSimilarity>,
    /// The single highest-scoring pair; `None` with fewer than two fields
    pub best_pair: Option<PairSimilarity>,
}

/// Dataset-wide completeness counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    /// Number of rows
    pub total_rows: u64,
    /// Number of fields
    pub total_fields: u64,
    /// rows x fields
    pub total_cells: u64,
    /// Cells classified as missing
    pub missing_cells: u64,
    /// Missing cells as a percentage of all cells (0-100)
    pub missing_ratio: f64,
    /// Rows with at least one missing value
    pub rows_with_missing: u64,
    /// Rows with missing values as a percentage of all rows (0-100)
    pub rows_with_missing_ratio: f64,
    /// Rows with no missing value
    pub complete_rows: u64,
    /// Rows with exactly one missing value
    pub single_missing_rows: u64,
    /// Rows with more than one missing value
    pub multi_missing_rows: u64,
    /// Missing count per field, in schema order
    #[serde(serialize_with = "serialize_missing_counts")]
    pub field_missing_counts: Vec<FieldMissingCount>,
}

impl AggregateSummary {
    /// Missing count recorded for `field`, if it is part of the schema.
    pub fn field_missing_count(&self, field: &str) -> Option<u64> {
        self.field_missing_counts
            .iter()
            .find(|count| count.field == field)
            .map(|count| count.missing_count)
    }
}

fn serialize_missing_counts<S: Serializer>(
    counts: &[FieldMissingCount],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for count in counts {
        map.serialize_entry(&count.field, &count.missing_count)?;
    }
    map.end()
}

/// Severity level for threshold violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    /// Missing rate is above the threshold
    Warning,
    /// Missing rate is far above the threshold
    Critical,
}

/// A field whose missing rate exceeds the configured maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdViolation {
    /// Field that violated the threshold
    pub field: String,
    /// The configured maximum missing rate (percent)
    pub threshold: f64,
    /// The measured missing rate (percent)
    pub actual: f64,
    /// Severity of the violation
    pub severity: ViolationSeverity,
}

/// Rates above this multiple of the threshold are classified as critical.
const CRITICAL_SEVERITY_RATIO: f64 = 2.0;

impl ThresholdViolation {
    /// Creates a new threshold violation.
    ///
    /// # Severity Classification
    /// - Critical: actual rate is more than twice the threshold
    /// - Warning: actual rate is above the threshold, up to twice it
    pub fn new(field: impl Into<String>, threshold: f64, actual: f64) -> Self {
        let severity = if actual > threshold * CRITICAL_SEVERITY_RATIO {
            ViolationSeverity::Critical
        } else {
            ViolationSeverity::Warning
        };

        Self {
            field: field.into(),
            threshold,
            actual,
            severity,
        }
    }
}

/// A filtered row handed to table rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPreview {
    /// Position of the row in the original dataset
    pub row_index: usize,
    /// Values in schema order
    pub values: Vec<Value>,
}

/// Complete analysis output for one dataset snapshot and predicate.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// Field names in schema order
    pub fields: Vec<String>,
    /// Number of rows analyzed
    pub analyzed_rows: u64,
    /// Number of fields analyzed
    pub analyzed_fields: u64,
    /// Per-field missing/unique statistics
    pub column_statistics: ColumnStatistics,
    /// Per-field missingness vectors
    pub indicators: MissingnessIndicators,
    /// Most-missing fields and most-correlated pairs
    pub correlations: CorrelationReport,
    /// Dataset-wide completeness counters
    pub summary: AggregateSummary,
    /// Rows matching the predicate before the preview cap
    pub matched_rows: u64,
    /// Matching rows, capped to the preview limit
    pub rows: Vec<RowPreview>,
    /// Fields whose missing rate exceeds the configured maximum
    pub threshold_violations: Vec<ThresholdViolation>,
    /// Timestamp when analysis was performed
    pub analyzed_at: DateTime<Utc>,
}
