//! Core data structures and analytics for nullsight.
//!
//! This crate computes dataset quality analytics over an in-memory table
//! snapshot: per-field missing/unique statistics, missingness indicators,
//! correlated missingness between field pairs, row completeness summaries,
//! and row filtering by missing/uniqueness predicates.
//!
//! # Guarantees
//! - Every analysis is a pure function of an immutable [`Dataset`]
//! - Analyses never fail: a filter on an unknown field matches nothing,
//!   empty input yields zero rates
//! - No I/O, no background tasks, no caching between calls
//!
//! # Architecture
//! - [`models`]: schema-aligned dataset snapshot built once at the boundary
//! - [`quality`]: the analyses and the [`quality::QualityAnalyzer`] facade
//! - [`validation`]: JSON dataset documents checked against an embedded schema

pub mod error;
pub mod logging;
pub mod models;
pub mod quality;
pub mod validation;

// Re-export commonly used types
pub use error::{NullsightError, Result};
pub use logging::{LogFormat, init_logging};
pub use models::{Dataset, Record, Value};
pub use quality::{AnalysisConfig, FilterPredicate, QualityAnalyzer, QualityReport};
pub use validation::{
    ValidationError, initialize_dataset_validator, parse_dataset_document,
    validate_dataset_document,
};
