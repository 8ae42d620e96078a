//! Weighted fusion of metric outcomes into one explainable score.

use indexmap::IndexMap;
use tracing::{debug, info};
use translation_benchmark_common::MetricsConfig;
use translation_benchmark_domain::{
    clamp_score, title_case, MetricName, MetricOutcome, MetricResult, QualityTier, ScoreBreakdown,
};

/// Number of metrics named in the explanation.
const TOP_FACTORS: usize = 3;

/// Combines per-metric outcomes using the configured weights.
///
/// Metrics whose weight resolves to 0 are dropped entirely, warnings
/// included.
#[derive(Debug, Clone)]
pub struct ScoreFusion {
    weights: IndexMap<MetricName, f64>,
}

impl ScoreFusion {
    /// Resolve weights for every metric from the configuration.
    pub fn new(config: &MetricsConfig) -> Self {
        let weights = MetricName::ALL
            .into_iter()
            .map(|name| (name, config.weight_for(name)))
            .collect();
        Self { weights }
    }

    /// Resolved weight of a metric.
    pub fn weight(&self, name: MetricName) -> f64 {
        self.weights.get(&name).copied().unwrap_or(0.0)
    }

    /// Fuse outcomes, in insertion order, into a breakdown.
    pub fn fuse(&self, outcomes: &IndexMap<MetricName, MetricOutcome>) -> ScoreBreakdown {
        let mut metrics = Vec::with_capacity(outcomes.len());
        let mut warnings = Vec::new();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for (name, outcome) in outcomes {
            let weight = self.weight(*name);
            if weight <= 0.0 {
                debug!(metric = %name, "Dropping zero-weight metric");
                continue;
            }

            weighted_sum += outcome.score * weight;
            total_weight += weight;

            if let Some(warning) = &outcome.warning {
                warnings.push(format!("{}: {}", name, warning));
            }

            metrics.push(MetricResult {
                name: name.as_str().to_string(),
                value: outcome.score,
                weight,
                details: outcome.details.clone(),
            });
        }

        let overall_score = if total_weight > 0.0 {
            clamp_score(weighted_sum / total_weight)
        } else {
            0.0
        };

        let explanation = Self::explain(&metrics, overall_score);

        info!(overall = overall_score, kept = metrics.len(), "Score fusion complete");

        ScoreBreakdown {
            overall_score,
            metrics,
            warnings,
            explanation,
        }
    }

    /// Human readable summary: quality tier, score, and the metrics with
    /// the largest weighted contribution (ties keep evaluation order).
    pub fn explain(metrics: &[MetricResult], overall_score: f64) -> String {
        let mut ranked: Vec<&MetricResult> = metrics.iter().collect();
        ranked.sort_by(|a, b| b.contribution().total_cmp(&a.contribution()));

        let top_names: Vec<String> = ranked
            .iter()
            .take(TOP_FACTORS)
            .map(|m| title_case(&m.name))
            .collect();

        format!(
            "{} translation quality (score: {:.1}/100). Top factors: {}.",
            QualityTier::from_score(overall_score),
            overall_score,
            top_names.join(", ")
        )
    }
}
