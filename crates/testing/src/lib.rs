//! Testing utilities for the translation benchmark
//!
//! This crate provides:
//! - Fixtures: realistic sentence pairs and canned evaluation results
//! - Builder patterns for configurations and results
//! - Mock language detectors, embedding models and model loaders
//! - Property-based testing strategies
//!
//! # Examples
//!
//! ```
//! use translation_benchmark_testing::{builders::*, mocks::*};
//!
//! // Only run the length ratio heuristic
//! let config = MetricsConfigBuilder::none()
//!     .length_ratio(1.0)
//!     .build();
//! assert_eq!(config.enabled_metrics().len(), 1);
//!
//! // A detector that always answers Spanish with 97% confidence
//! let detector = StubDetector::single("es", 0.97);
//! assert_eq!(detector.call_count(), 0);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
