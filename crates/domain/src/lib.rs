//! Translation Benchmark Domain Types
//!
//! This crate provides the core data model of the translation benchmark
//! evaluation engine: metric identifiers and outcomes, fused score
//! breakdowns, persisted metric rows, comparison run summaries, and the
//! ports through which the engine reaches language detection and embedding
//! backends.
//!
//! ## Architecture
//!
//! - **identifiers**: Opaque translation identifiers
//! - **metric**: Metric names, outcomes and weighted results
//! - **evaluation**: Score breakdowns, quality tiers and evaluation results
//! - **records**: Flat metric rows for the result store
//! - **summary**: Provider rankings for a comparison run
//! - **language**: Supported languages and the detector port
//! - **embedding**: Embedding model and loader ports
//! - **errors**: Domain error types
//!
//! ## Usage
//!
//! ```rust
//! use translation_benchmark_domain::{MetricName, QualityTier};
//!
//! let name: MetricName = "length_ratio".parse().unwrap();
//! assert_eq!(name.title(), "Length Ratio");
//! assert_eq!(QualityTier::from_score(82.0), QualityTier::Good);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod embedding;
pub mod errors;
pub mod evaluation;
pub mod identifiers;
pub mod language;
pub mod metric;
pub mod records;
pub mod summary;

pub use embedding::{EmbeddingError, EmbeddingModel, ModelLoader};
pub use errors::{DomainError, DomainResult};
pub use evaluation::{EvaluationResult, QualityTier, ScoreBreakdown, TRANSLATION_FAILED};
pub use identifiers::TranslationId;
pub use language::{DetectionError, LanguageDetector, LanguageProbability};
pub use metric::{
    clamp_score, title_case, MetricCategory, MetricDetails, MetricName, MetricOutcome,
    MetricResult,
};
pub use records::{MetricRecord, OVERALL_SCORE_METRIC};
pub use summary::{ProviderRanking, RunSummary};
