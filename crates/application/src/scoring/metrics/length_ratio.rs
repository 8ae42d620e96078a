//! Character length ratio between translation and source.

use async_trait::async_trait;
use tracing::{debug, instrument};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{MetricName, MetricOutcome};

use super::{Metric, MetricInput};

/// Flags truncated or padded translations.
///
/// Inside `[min_ratio, max_ratio]` the score peaks at 100 for a ratio of 1
/// and falls linearly toward the nearer bound, never below 50. Outside the
/// band it falls from 50 toward 0.
#[derive(Debug, Clone)]
pub struct LengthRatioMetric {
    min_ratio: f64,
    max_ratio: f64,
}

impl LengthRatioMetric {
    /// Requires `0 < min_ratio < 1 < max_ratio`.
    pub fn new(min_ratio: f64, max_ratio: f64) -> Self {
        Self {
            min_ratio,
            max_ratio,
        }
    }

    fn score_ratio(&self, ratio: f64) -> f64 {
        if (self.min_ratio..=self.max_ratio).contains(&ratio) {
            let score = if ratio < 1.0 {
                (ratio - self.min_ratio) / (1.0 - self.min_ratio) * 100.0
            } else {
                (self.max_ratio - ratio) / (self.max_ratio - 1.0) * 100.0
            };
            score.max(50.0)
        } else {
            let score = if ratio < self.min_ratio {
                ratio / self.min_ratio * 50.0
            } else {
                self.max_ratio / ratio * 50.0
            };
            score.clamp(0.0, 50.0)
        }
    }
}

impl Default for LengthRatioMetric {
    fn default() -> Self {
        Self::new(0.5, 2.0)
    }
}

#[async_trait]
impl Metric for LengthRatioMetric {
    #[instrument(skip(self, input), fields(metric = "length_ratio"))]
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome {
        let source_len = input.source_text.chars().count();
        let target_len = input.target_text.chars().count();

        let empty = if source_len == 0 {
            Some(warnings::EMPTY_SOURCE)
        } else if target_len == 0 {
            Some(warnings::EMPTY_TRANSLATION)
        } else {
            None
        };
        if let Some(warning) = empty {
            return MetricOutcome::degenerate(warning)
                .with_detail("ratio", 0.0)
                .with_detail("source_length", source_len)
                .with_detail("target_length", target_len);
        }

        let ratio = target_len as f64 / source_len as f64;
        let score = self.score_ratio(ratio);

        let warning = if ratio < self.min_ratio {
            Some(format!(
                "{}: translation too short (ratio: {:.2})",
                warnings::LENGTH_ANOMALY,
                ratio
            ))
        } else if ratio > self.max_ratio {
            Some(format!(
                "{}: translation too long (ratio: {:.2})",
                warnings::LENGTH_ANOMALY,
                ratio
            ))
        } else {
            None
        };

        debug!(ratio = ratio, source_len, target_len, score = score, "Length ratio");

        MetricOutcome::new(score)
            .with_optional_warning(warning)
            .with_detail("ratio", ratio)
            .with_detail("source_length", source_len)
            .with_detail("target_length", target_len)
    }

    fn name(&self) -> MetricName {
        MetricName::LengthRatio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_shape() {
        let metric = LengthRatioMetric::default();

        assert_eq!(metric.score_ratio(1.0), 100.0);
        assert!((metric.score_ratio(0.9) - 80.0).abs() < 1e-9);
        assert!((metric.score_ratio(1.5) - 50.0).abs() < 1e-9);
        // In-band floor
        assert_eq!(metric.score_ratio(0.55), 50.0);
        assert_eq!(metric.score_ratio(0.5), 50.0);
        assert_eq!(metric.score_ratio(2.0), 50.0);
        // Out of band
        assert!((metric.score_ratio(0.25) - 25.0).abs() < 1e-9);
        assert!((metric.score_ratio(4.0) - 25.0).abs() < 1e-9);
        assert!(metric.score_ratio(0.01) < 2.0);
    }

    #[tokio::test]
    async fn test_empty_inputs() {
        let metric = LengthRatioMetric::default();

        let outcome = metric.evaluate(&MetricInput::new("", "Hola", "es")).await;
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.warning.as_deref(), Some(warnings::EMPTY_SOURCE));

        let outcome = metric.evaluate(&MetricInput::new("Hello", "", "es")).await;
        assert_eq!(outcome.score, 0.0);
        assert_eq!(outcome.warning.as_deref(), Some(warnings::EMPTY_TRANSLATION));
    }

    #[tokio::test]
    async fn test_long_translation_warning() {
        let metric = LengthRatioMetric::default();
        let outcome = metric
            .evaluate(&MetricInput::new("Hi", "Hola, ¿qué tal estás hoy?", "es"))
            .await;

        assert!(outcome.score < 50.0);
        let warning = outcome.warning.unwrap();
        assert!(warning.starts_with(warnings::LENGTH_ANOMALY));
        assert!(warning.contains("too long"));
    }

    #[tokio::test]
    async fn test_counts_characters_not_bytes() {
        let metric = LengthRatioMetric::default();
        let outcome = metric
            .evaluate(&MetricInput::new("Hello, world!", "¡Hola, mundo!", "es"))
            .await;

        assert_eq!(outcome.detail_f64("ratio"), Some(1.0));
        assert_eq!(outcome.score, 100.0);
    }
}
