//! Application layer for the translation benchmark
//!
//! This crate holds the evaluation engine: the metric library, the score
//! fusion step and the orchestrator that runs configured metrics over a
//! source/target pair.
//!
//! ## Modules
//!
//! - `scoring` - Metrics, score fusion and the evaluator

pub mod scoring;

// Re-export commonly used types
pub use scoring::{
    cosine_similarity, DefaultModelLoader, EvaluationRequest, Evaluator, EvaluatorBuilder,
    HashingEmbedder, Metric, MetricInput, ScoreFusion, WhatlangDetector,
};

// Common error types for the application layer
use thiserror::Error;

/// Application-level errors
///
/// Per-evaluation failures never surface here: metrics degrade to a score
/// and a warning instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    /// Configuration rejected when building the evaluator
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApplicationError {
    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

impl From<validator::ValidationErrors> for ApplicationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApplicationError::InvalidConfiguration(errors.to_string())
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
