//! Error types for the translation benchmark domain.

/// Errors raised by domain types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Metric name outside the closed metric set
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Persisted evaluation rows cannot be turned back into a result
    #[error("Invalid evaluation record: {0}")]
    InvalidRecord(String),
}

impl DomainError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMetric(_) => "UNKNOWN_METRIC",
            Self::InvalidRecord(_) => "INVALID_RECORD",
        }
    }
}

/// Result alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
