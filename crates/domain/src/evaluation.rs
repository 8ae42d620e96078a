//! Evaluation results and score breakdowns.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::identifiers::TranslationId;
use crate::metric::MetricResult;

/// Explanation used for translations that failed before evaluation.
pub const TRANSLATION_FAILED: &str = "Translation failed";

/// Quality tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// Score of at least 90
    Excellent,
    /// Score of at least 75
    Good,
    /// Score of at least 60
    Fair,
    /// Anything lower
    Poor,
}

impl QualityTier {
    /// Bucket an overall score into a tier.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::Excellent
        } else if score >= 75.0 {
            Self::Good
        } else if score >= 60.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    /// Display label of the tier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }
}

impl Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fused view over all metrics that count toward the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted overall score in `[0, 100]`
    pub overall_score: f64,
    /// Kept metrics in evaluation order
    pub metrics: Vec<MetricResult>,
    /// Warnings of kept metrics, prefixed with the metric name
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Human readable explanation
    #[serde(default)]
    pub explanation: String,
}

impl ScoreBreakdown {
    /// Breakdown with no metrics and a zero score.
    pub fn empty(explanation: impl Into<String>) -> Self {
        Self {
            overall_score: 0.0,
            metrics: Vec::new(),
            warnings: Vec::new(),
            explanation: explanation.into(),
        }
    }

    /// Quality tier of the overall score.
    pub fn tier(&self) -> QualityTier {
        QualityTier::from_score(self.overall_score)
    }

    /// Find a kept metric by name.
    pub fn metric(&self, name: &str) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// Complete evaluation of one provider translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Identifier supplied by the caller
    pub translation_id: TranslationId,
    /// Provider that produced the translation
    pub provider_name: String,
    /// Model used by the provider
    pub model_id: String,
    /// Fused scores
    pub score_breakdown: ScoreBreakdown,
}

impl EvaluationResult {
    /// Synthetic all-zero result for a translation that failed upstream.
    pub fn translation_failed(
        translation_id: TranslationId,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
        error: Option<&str>,
    ) -> Self {
        let warning = error
            .filter(|e| !e.is_empty())
            .unwrap_or(TRANSLATION_FAILED)
            .to_string();

        let mut score_breakdown = ScoreBreakdown::empty(TRANSLATION_FAILED);
        score_breakdown.warnings.push(warning);

        Self {
            translation_id,
            provider_name: provider_name.into(),
            model_id: model_id.into(),
            score_breakdown,
        }
    }

    /// Overall score shortcut.
    pub fn overall_score(&self) -> f64 {
        self.score_breakdown.overall_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_tiers() {
        assert_eq!(QualityTier::from_score(100.0), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(90.0), QualityTier::Excellent);
        assert_eq!(QualityTier::from_score(89.99), QualityTier::Good);
        assert_eq!(QualityTier::from_score(75.0), QualityTier::Good);
        assert_eq!(QualityTier::from_score(60.0), QualityTier::Fair);
        assert_eq!(QualityTier::from_score(59.9), QualityTier::Poor);
        assert_eq!(QualityTier::from_score(0.0), QualityTier::Poor);
    }

    #[test]
    fn test_translation_failed_result() {
        let result = EvaluationResult::translation_failed(
            TranslationId::from(7_i64),
            "deepl",
            "default",
            Some("Provider request timed out"),
        );

        assert_eq!(result.overall_score(), 0.0);
        assert!(result.score_breakdown.metrics.is_empty());
        assert_eq!(result.score_breakdown.warnings, vec!["Provider request timed out"]);
        assert_eq!(result.score_breakdown.explanation, TRANSLATION_FAILED);
    }

    #[test]
    fn test_translation_failed_without_message() {
        let result =
            EvaluationResult::translation_failed(TranslationId::from("t-1"), "openai", "gpt-4", None);
        assert_eq!(result.score_breakdown.warnings, vec![TRANSLATION_FAILED]);
    }
}
