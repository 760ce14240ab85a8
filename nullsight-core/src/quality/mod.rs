//! Dataset quality analytics.
//!
//! This module provides the missingness and uniqueness analyses:
//! - **Classification**: decide whether a value is missing or present
//! - **Column statistics**: per-field missing/unique counts and rates
//! - **Indicators**: per-field boolean vectors of missing rows
//! - **Correlation**: Jaccard similarity of missingness between field pairs
//! - **Summary**: dataset-wide row completeness counters
//! - **Filtering**: rows matching missing/uniqueness predicates
//!
//! Every function is pure over an immutable [`Dataset`](crate::Dataset)
//! snapshot and recomputes from scratch on each call. The per-field and
//! per-pair passes are independent of each other.
//!
//! # Example
//! ```rust
//! use nullsight_core::{Dataset, Value};
//! use nullsight_core::quality::{build_indicators, compute_correlations, summarize};
//!
//! let dataset = Dataset::new(
//!     vec!["a".to_string(), "b".to_string()],
//!     vec![vec![Value::Null, Value::Null], vec![Value::from(1), Value::from("x")]],
//! )?;
//!
//! let indicators = build_indicators(&dataset);
//! let correlations = compute_correlations(&indicators);
//! assert_eq!(correlations.best_pair.map(|pair| pair.jaccard), Some(1.0));
//! assert_eq!(summarize(&dataset, &indicators).multi_missing_rows, 1);
//! # Ok::<(), nullsight_core::NullsightError>(())
//! ```

mod analyzer;
pub mod classifier;
mod column_stats;
mod config;
mod correlation;
mod filter;
mod indicators;
mod models;
mod summary;

// Re-export public API
pub use analyzer::QualityAnalyzer;
pub use classifier::{is_missing, normalize};
pub use column_stats::compute_column_stats;
pub use config::{
    AnalysisConfig, ConfigValidationError, DEFAULT_MISSING_RATE_MAX, DEFAULT_PREVIEW_ROW_LIMIT,
};
pub use correlation::{
    DEFAULT_TOP_FIELDS, DEFAULT_TOP_PAIRS, compute_correlations, compute_correlations_with_limits,
    jaccard, pair_similarities,
};
pub use filter::{
    FilterPredicate, MissingFilter, UniqueFilter, filter_records, matching_rows, preview_rows,
};
pub use indicators::build_indicators;
pub use models::{
    AggregateSummary, ColumnStatistics, CorrelationReport, FieldMissingCount, FieldStatistics,
    MissingnessIndicators, PairSimilarity, QualityReport, RowPreview, ThresholdViolation,
    ViolationSeverity,
};
pub use summary::summarize;
