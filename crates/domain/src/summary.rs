//! Comparison run summaries.

use serde::{Deserialize, Serialize};

use crate::evaluation::EvaluationResult;

/// Position of one provider in a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRanking {
    /// 1-based rank
    pub rank: usize,
    /// Provider name
    pub provider: String,
    /// Model used by the provider
    pub model: String,
    /// Overall score
    pub score: f64,
    /// Translation latency, when the provider reported one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Ranked outcome of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of providers that took part
    pub total_providers: usize,
    /// Providers ordered by overall score, best first
    pub rankings: Vec<ProviderRanking>,
    /// Name of the best scoring provider
    pub best_provider: Option<String>,
    /// Score of the best scoring provider
    pub best_score: Option<f64>,
}

impl RunSummary {
    /// Rank evaluations by overall score, highest first.
    ///
    /// Ties keep their input order.
    pub fn rank<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a EvaluationResult, Option<u64>)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by(|(a, _), (b, _)| b.overall_score().total_cmp(&a.overall_score()));

        let rankings: Vec<ProviderRanking> = entries
            .iter()
            .enumerate()
            .map(|(idx, (result, latency_ms))| ProviderRanking {
                rank: idx + 1,
                provider: result.provider_name.clone(),
                model: result.model_id.clone(),
                score: result.overall_score(),
                latency_ms: *latency_ms,
            })
            .collect();

        let best = rankings.first();

        Self {
            total_providers: rankings.len(),
            best_provider: best.map(|r| r.provider.clone()),
            best_score: best.map(|r| r.score),
            rankings,
        }
    }

    /// Whether the run had no providers at all.
    pub fn is_empty(&self) -> bool {
        self.rankings.is_empty()
    }
}
