//! Analysis configuration.
//!
//! Controls ranking sizes, the preview cap for filtered rows, and the
//! missing-rate threshold used to flag problematic fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::correlation::{DEFAULT_TOP_FIELDS, DEFAULT_TOP_PAIRS};

/// Default number of filtered rows handed to table rendering.
pub const DEFAULT_PREVIEW_ROW_LIMIT: usize = 100;

/// Default maximum tolerated missing rate, in percent.
pub const DEFAULT_MISSING_RATE_MAX: f64 = 20.0;

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of most-missing fields to report
    pub top_fields_limit: usize,
    /// Number of most-correlated pairs to report
    pub top_pairs_limit: usize,
    /// Maximum number of filtered rows included in a report
    pub preview_row_limit: usize,
    /// Missing rate (0-100) above which a field is flagged
    pub missing_rate_max: f64,
}

/// Validation errors for analysis configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("top_fields_limit must be at least 1, got {0}")]
    InvalidTopFields(usize),
    #[error("top_pairs_limit must be at least 1, got {0}")]
    InvalidTopPairs(usize),
    #[error("preview_row_limit must be at least 1, got {0}")]
    InvalidPreviewLimit(usize),
    #[error("missing_rate_max must be between 0.0 and 100.0, got {0}")]
    InvalidMissingRate(f64),
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_fields_limit: DEFAULT_TOP_FIELDS,
            top_pairs_limit: DEFAULT_TOP_PAIRS,
            preview_row_limit: DEFAULT_PREVIEW_ROW_LIMIT,
            missing_rate_max: DEFAULT_MISSING_RATE_MAX,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new analysis config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set how many fields are ranked.
    pub fn with_top_fields_limit(mut self, limit: usize) -> Self {
        self.top_fields_limit = at_least_one("top_fields_limit", limit);
        self
    }

    /// Builder method to set how many pairs are ranked.
    pub fn with_top_pairs_limit(mut self, limit: usize) -> Self {
        self.top_pairs_limit = at_least_one("top_pairs_limit", limit);
        self
    }

    /// Builder method to set the preview row cap.
    pub fn with_preview_row_limit(mut self, limit: usize) -> Self {
        self.preview_row_limit = at_least_one("preview_row_limit", limit);
        self
    }

    /// Builder method to set the missing-rate threshold (percent).
    pub fn with_missing_rate_max(mut self, threshold: f64) -> Self {
        if !(0.0..=100.0).contains(&threshold) {
            tracing::warn!(
                "missing_rate_max {} clamped to valid range [0.0, 100.0]",
                threshold
            );
        }
        self.missing_rate_max = if threshold.is_nan() {
            DEFAULT_MISSING_RATE_MAX
        } else {
            threshold.clamp(0.0, 100.0)
        };
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error if a limit is zero or the threshold is outside
    /// `[0.0, 100.0]`.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_fields_limit == 0 {
            return Err(ConfigValidationError::InvalidTopFields(
                self.top_fields_limit,
            ));
        }
        if self.top_pairs_limit == 0 {
            return Err(ConfigValidationError::InvalidTopPairs(self.top_pairs_limit));
        }
        if self.preview_row_limit == 0 {
            return Err(ConfigValidationError::InvalidPreviewLimit(
                self.preview_row_limit,
            ));
        }
        if !(0.0..=100.0).contains(&self.missing_rate_max) {
            return Err(ConfigValidationError::InvalidMissingRate(
                self.missing_rate_max,
            ));
        }
        Ok(())
    }
}

fn at_least_one(name: &str, limit: usize) -> usize {
    if limit == 0 {
        tracing::warn!("{} of 0 raised to 1", name);
        1
    } else {
        limit
    }
}
