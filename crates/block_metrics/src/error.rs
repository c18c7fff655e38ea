//! Error types for block metrics.
//!
//! Metric queries never fail: unknown names and empty histories read as
//! zero. Errors only come from configuration and export.

use thiserror::Error;

/// Errors that can occur when configuring or exporting metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to serialize a metrics snapshot
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for metrics operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
