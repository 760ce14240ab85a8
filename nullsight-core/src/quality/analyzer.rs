//! Quality analyzer facade.
//!
//! This module provides the `QualityAnalyzer` that runs every analysis over
//! one dataset snapshot and assembles a single [`QualityReport`].

use chrono::Utc;

use crate::Result;
use crate::error::NullsightError;
use crate::models::Dataset;

use super::column_stats::compute_column_stats;
use super::config::AnalysisConfig;
use super::correlation::compute_correlations_with_limits;
use super::filter::{FilterPredicate, matching_rows, preview_rows};
use super::indicators::build_indicators;
use super::models::{ColumnStatistics, QualityReport, ThresholdViolation};
use super::summary::summarize;

/// Quality analyzer for dataset snapshots.
///
/// # Example
///
/// ```rust
/// use nullsight_core::{Dataset, Value};
/// use nullsight_core::quality::{AnalysisConfig, FilterPredicate, QualityAnalyzer};
///
/// let dataset = Dataset::new(
///     vec!["id".to_string(), "email".to_string()],
///     vec![
///         vec![Value::from(1), Value::from("a@example.com")],
///         vec![Value::from(2), Value::Null],
///     ],
/// )?;
///
/// let analyzer = QualityAnalyzer::new(AnalysisConfig::default());
/// let report = analyzer.analyze(&dataset, &FilterPredicate::new().with_missing_in("email"))?;
///
/// assert_eq!(report.summary.missing_cells, 1);
/// assert_eq!(report.matched_rows, 1);
/// # Ok::<(), nullsight_core::NullsightError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QualityAnalyzer {
    config: AnalysisConfig,
}

impl QualityAnalyzer {
    /// Creates a new quality analyzer with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Creates a new quality analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Returns a reference to the analyzer configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes a dataset and returns the full report.
    ///
    /// Column statistics and indicators are computed independently; the
    /// correlation rankings and the summary are derived from the indicators.
    /// The filter runs against the full dataset and its matches are capped
    /// to `preview_row_limit`.
    ///
    /// # Errors
    /// Returns `NullsightError::Configuration` if the configuration is
    /// invalid. The analysis itself cannot fail.
    pub fn analyze(&self, dataset: &Dataset, predicate: &FilterPredicate) -> Result<QualityReport> {
        self.config
            .validate()
            .map_err(|e| NullsightError::configuration(e.to_string()))?;

        tracing::debug!(
            "Analyzing dataset with {} rows and {} fields",
            dataset.row_count(),
            dataset.field_count()
        );

        let column_statistics = compute_column_stats(dataset);
        let indicators = build_indicators(dataset);
        let correlations = compute_correlations_with_limits(
            &indicators,
            self.config.top_fields_limit,
            self.config.top_pairs_limit,
        );
        let summary = summarize(dataset, &indicators);

        let matches = matching_rows(dataset, predicate);
        let rows = preview_rows(dataset, &matches, self.config.preview_row_limit);

        let threshold_violations = self.threshold_violations(&column_statistics);
        if !threshold_violations.is_empty() {
            tracing::info!(
                "{} fields exceed the {:.1}% missing-rate threshold",
                threshold_violations.len(),
                self.config.missing_rate_max
            );
        }

        Ok(QualityReport {
            fields: dataset.fields().to_vec(),
            analyzed_rows: dataset.row_count() as u64,
            analyzed_fields: dataset.field_count() as u64,
            column_statistics,
            indicators,
            correlations,
            summary,
            matched_rows: matches.len() as u64,
            rows,
            threshold_violations,
            analyzed_at: Utc::now(),
        })
    }

    /// Flags fields whose missing rate is above the configured maximum.
    fn threshold_violations(&self, statistics: &ColumnStatistics) -> Vec<ThresholdViolation> {
        statistics
            .iter()
            .filter(|stats| stats.missing_rate > self.config.missing_rate_max)
            .map(|stats| {
                ThresholdViolation::new(
                    &stats.field,
                    self.config.missing_rate_max,
                    stats.missing_rate,
                )
            })
            .collect()
    }
}
