//! Metric library.
//!
//! Each metric scores one quality axis of a translation on a 0-100 scale.
//! Metrics never fail: degenerate input and backend errors are reported as a
//! fixed score plus a warning on the returned [`MetricOutcome`].

mod language;
mod length_ratio;
mod preservation;
mod repetition;
mod semantic;

pub use language::{LanguageMatchMetric, WhatlangDetector};
pub use length_ratio::LengthRatioMetric;
pub use preservation::PreservationMetric;
pub use repetition::RepetitionMetric;
pub use semantic::{cosine_similarity, SemanticSimilarityMetric};

use async_trait::async_trait;
use translation_benchmark_domain::{MetricName, MetricOutcome};

/// Texts a metric looks at.
#[derive(Debug, Clone, Copy)]
pub struct MetricInput<'a> {
    /// Text that was translated
    pub source_text: &'a str,
    /// Provider output
    pub target_text: &'a str,
    /// Requested ISO 639-1 target language
    pub target_lang: &'a str,
    /// Source language, when known
    pub source_lang: Option<&'a str>,
}

impl<'a> MetricInput<'a> {
    /// Input for a source/target pair.
    pub fn new(source_text: &'a str, target_text: &'a str, target_lang: &'a str) -> Self {
        Self {
            source_text,
            target_text,
            target_lang,
            source_lang: None,
        }
    }
}

/// One scoring axis.
#[async_trait]
pub trait Metric: Send + Sync {
    /// Score a translation.
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome;

    /// Metric identifier.
    fn name(&self) -> MetricName;
}
