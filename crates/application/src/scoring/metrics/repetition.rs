//! Degenerate repetition detection.

use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, instrument};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{MetricName, MetricOutcome};

use super::{Metric, MetricInput};

/// Penalises repeated n-grams in the translation. The source is ignored.
#[derive(Debug, Clone)]
pub struct RepetitionMetric {
    max_ngram_size: usize,
    threshold: f64,
}

impl RepetitionMetric {
    /// Inspect n-grams of size 2 through `max_ngram_size`, warning above `threshold`.
    pub fn new(max_ngram_size: usize, threshold: f64) -> Self {
        Self {
            max_ngram_size,
            threshold,
        }
    }

    /// Repetition level in `[0, 1]` of one n-gram size, `None` when the text
    /// has fewer than `n` tokens.
    fn ngram_repetition(tokens: &[&str], n: usize) -> Option<f64> {
        if n == 0 || tokens.len() < n {
            return None;
        }

        let mut counts: HashMap<&[&str], usize> = HashMap::new();
        for ngram in tokens.windows(n) {
            *counts.entry(ngram).or_insert(0) += 1;
        }

        let total = (tokens.len() - n + 1) as f64;
        let mut repetition = 1.0 - counts.len() as f64 / total;

        // A single dominant n-gram outweighs the uniqueness ratio.
        let max_count = counts.values().copied().max().unwrap_or(0);
        if max_count > 1 {
            let frequency_factor = (max_count as f64 / total).min(1.0);
            repetition = repetition.max(frequency_factor);
        }

        Some(repetition)
    }
}

impl Default for RepetitionMetric {
    fn default() -> Self {
        Self::new(4, 0.3)
    }
}

#[async_trait]
impl Metric for RepetitionMetric {
    #[instrument(skip(self, input), fields(metric = "repetition"))]
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome {
        if input.target_text.trim().is_empty() {
            return MetricOutcome::degenerate(warnings::EMPTY_TRANSLATION)
                .with_detail("repetition_score", 0.0);
        }

        let lowered = input.target_text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        let mut ngram_scores = IndexMap::new();
        let mut max_repetition: f64 = 0.0;
        for n in 2..=self.max_ngram_size {
            if let Some(repetition) = Self::ngram_repetition(&tokens, n) {
                ngram_scores.insert(format!("{}-gram", n), repetition);
                max_repetition = max_repetition.max(repetition);
            }
        }

        let score = (1.0 - max_repetition) * 100.0;

        let warning = (max_repetition > self.threshold).then(|| {
            format!("{} (score: {:.2})", warnings::HIGH_REPETITION, max_repetition)
        });

        debug!(max_repetition = max_repetition, score = score, "Repetition analysis");

        MetricOutcome::new(score)
            .with_optional_warning(warning)
            .with_detail("repetition_score", max_repetition)
            .with_detail("ngram_scores", ngram_scores)
    }

    fn name(&self) -> MetricName {
        MetricName::Repetition
    }
}
