//! Error types for nullsight.
//!
//! The analytics passes themselves are total over their input domain and
//! never fail: a filter on an unknown field matches nothing and empty input
//! yields zero rates. Errors only arise at the boundaries, when a dataset is
//! constructed, a configuration is validated, or a document is loaded.

use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for nullsight operations.
#[derive(Debug, Error)]
pub enum NullsightError {
    /// Dataset could not be built from the supplied schema and rows
    #[error("Invalid dataset: {message}")]
    Dataset { message: String },

    /// Configuration or threshold error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Dataset document failed validation
    #[error("Dataset document rejected: {context}")]
    Validation {
        context: String,
        #[source]
        source: ValidationError,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with NullsightError
pub type Result<T> = std::result::Result<T, NullsightError>;

impl NullsightError {
    /// Creates a dataset construction error
    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wraps a document validation failure with context
    pub fn validation(context: impl Into<String>, source: ValidationError) -> Self {
        Self::Validation {
            context: context.into(),
            source,
        }
    }

    /// Wraps an I/O failure with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Wraps a serde_json failure with context
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_creation() {
        let error = NullsightError::dataset("duplicate field 'id'");
        assert!(error.to_string().contains("duplicate field 'id'"));

        let error = NullsightError::configuration("top_pairs_limit must be at least 1");
        assert!(error.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = NullsightError::io("Failed to read data.json", source);

        assert!(error.to_string().contains("data.json"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_validation_error_keeps_source() {
        let error = NullsightError::validation(
            "data.json",
            ValidationError::UnsupportedVersion {
                version: "2.0".to_string(),
                supported: vec!["1.0".to_string()],
            },
        );

        let source = error.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("2.0"));
    }
}
