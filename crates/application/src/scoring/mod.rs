//! Scoring module - metrics, score fusion and the evaluator
//!
//! A request flows through the [`Evaluator`], which runs every enabled
//! [`Metric`] independently and passes their outcomes to [`ScoreFusion`].

mod embedding;
mod evaluator;
mod fusion;
pub mod metrics;

pub use embedding::{DefaultModelLoader, HashingEmbedder, FASTEMBED_MODELS, HASHING_MODEL_ID};
pub use evaluator::{EvaluationRequest, Evaluator, EvaluatorBuilder};
pub use fusion::ScoreFusion;
pub use metrics::{
    cosine_similarity, LanguageMatchMetric, LengthRatioMetric, Metric, MetricInput,
    PreservationMetric, RepetitionMetric, SemanticSimilarityMetric, WhatlangDetector,
};
