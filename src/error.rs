//! Unified error types for gridscore.
//!
//! Nothing in the scoring core is fatal: malformed input is recovered
//! locally and surfaced to consumers as a degraded reading. These types
//! cover the two places that do reject input, the snapshot ingestion
//! boundary and configuration validation.

use thiserror::Error;

/// Main error type for gridscore operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AssessError {
    /// A snapshot was rejected at the ingestion boundary
    #[error("Snapshot rejected: {context}")]
    Snapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific snapshot rejection kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("field '{field}' is not a finite number")]
    NonFinite { field: String },

    #[error("field '{field}' must be non-negative, got {value}")]
    Negative { field: String, value: f64 },
}

/// Convenient Result type for gridscore operations
pub type Result<T> = std::result::Result<T, AssessError>;

impl AssessError {
    /// Create a snapshot rejection with context
    pub fn snapshot(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::Snapshot {
            context: context.into(),
            source,
        }
    }

    /// Create a snapshot rejection for a non-finite field
    pub fn non_finite(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::snapshot(
            format!("invalid numeric field '{field}'"),
            SnapshotErrorKind::NonFinite { field },
        )
    }

    /// Create a snapshot rejection for a negative field
    pub fn negative(field: impl Into<String>, value: f64) -> Self {
        let field = field.into();
        Self::snapshot(
            format!("invalid numeric field '{field}'"),
            SnapshotErrorKind::Negative { field, value },
        )
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
