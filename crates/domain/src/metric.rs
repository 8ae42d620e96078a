//! Metric identifiers and per-metric results.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::DomainError;

/// Lowest score any metric may report.
pub const SCORE_MIN: f64 = 0.0;

/// Highest score any metric may report.
pub const SCORE_MAX: f64 = 100.0;

/// Diagnostic sub-values attached to a metric outcome, in insertion order.
pub type MetricDetails = IndexMap<String, serde_json::Value>;

/// Warning texts shared by several metrics.
pub mod warnings {
    /// Target text is empty or whitespace only.
    pub const EMPTY_TRANSLATION: &str = "Empty translation";
    /// Source text is empty.
    pub const EMPTY_SOURCE: &str = "Empty source text";
    /// Either side of a cross-lingual comparison is empty.
    pub const EMPTY_TEXT: &str = "Empty text";
    /// The language detector produced no candidates.
    pub const UNDETECTED_LANGUAGE: &str = "Could not detect language";
    /// The detected language matches but below the confidence threshold.
    pub const LOW_CONFIDENCE: &str = "Low confidence in language detection";
    /// Length ratio outside the accepted band.
    pub const LENGTH_ANOMALY: &str = "Unusual length ratio detected";
    /// Repeated n-grams above the configured threshold.
    pub const HIGH_REPETITION: &str = "High repetition detected in translation";
    /// Numbers or capitalised tokens missing from the target.
    pub const CONTENT_LOSS: &str = "Potential content loss detected";
    /// Punctuation density drifted between source and target.
    pub const FORMAT_DRIFT: &str = "Format preservation issues detected";
}

/// Configuration category a metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Cheap surface heuristics.
    Heuristics,
    /// Embedding based metrics.
    Semantic,
}

impl MetricCategory {
    /// Configuration key of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heuristics => "heuristics",
            Self::Semantic => "semantic",
        }
    }
}

/// The closed set of metrics the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    /// Detected language of the target matches the requested one.
    LanguageDetection,
    /// Character length ratio between target and source.
    LengthRatio,
    /// Degenerate repeated n-grams in the target.
    Repetition,
    /// Numbers, punctuation and capitalised tokens survive translation.
    Preservation,
    /// Cross-lingual embedding similarity.
    SemanticSimilarity,
}

impl MetricName {
    /// All metrics in evaluation order.
    pub const ALL: [MetricName; 5] = [
        MetricName::LanguageDetection,
        MetricName::LengthRatio,
        MetricName::Repetition,
        MetricName::Preservation,
        MetricName::SemanticSimilarity,
    ];

    /// Stable identifier, also used as the persisted metric name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LanguageDetection => "language_detection",
            Self::LengthRatio => "length_ratio",
            Self::Repetition => "repetition",
            Self::Preservation => "preservation",
            Self::SemanticSimilarity => "semantic_similarity",
        }
    }

    /// Configuration category of the metric.
    pub fn category(&self) -> MetricCategory {
        match self {
            Self::SemanticSimilarity => MetricCategory::Semantic,
            _ => MetricCategory::Heuristics,
        }
    }

    /// Dotted configuration path of the metric's weight.
    ///
    /// Semantic similarity is weighted at category level.
    pub fn weight_path(&self) -> String {
        match self.category() {
            MetricCategory::Semantic => format!("metrics.{}.weight", self.category().as_str()),
            MetricCategory::Heuristics => {
                format!("metrics.{}.{}.weight", self.category().as_str(), self.as_str())
            }
        }
    }

    /// Human readable title ("language_detection" -> "Language Detection").
    pub fn title(&self) -> String {
        title_case(self.as_str())
    }
}

impl Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::UnknownMetric(s.to_string()))
    }
}

/// Turn a snake_case identifier into a title: underscores become spaces, the
/// first letter of every word is upper-cased and the rest lower-cased.
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clamp a raw score into the valid range. Non-finite scores become 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(SCORE_MIN, SCORE_MAX)
    } else {
        SCORE_MIN
    }
}

/// Output of one metric invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOutcome {
    /// Score in `[0, 100]`.
    pub score: f64,
    /// Optional warning raised by the metric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    /// Metric specific diagnostics.
    #[serde(default)]
    pub details: MetricDetails,
}

impl MetricOutcome {
    /// Create an outcome with the given (clamped) score.
    pub fn new(score: f64) -> Self {
        Self {
            score: clamp_score(score),
            warning: None,
            details: MetricDetails::new(),
        }
    }

    /// Create a zero-score outcome carrying a warning.
    pub fn degenerate(warning: impl Into<String>) -> Self {
        Self::new(SCORE_MIN).with_warning(warning)
    }

    /// Attach a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    /// Attach an optional warning.
    pub fn with_optional_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }

    /// Add a detail to the outcome.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.details.insert(key.into(), v);
        }
        self
    }

    /// Look up a numeric detail.
    pub fn detail_f64(&self, key: &str) -> Option<f64> {
        self.details.get(key).and_then(serde_json::Value::as_f64)
    }
}

/// A metric that counts toward the overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Metric identifier.
    pub name: String,
    /// Metric score in `[0, 100]`.
    pub value: f64,
    /// Resolved weight; 0 when reconstructed from persisted rows.
    pub weight: f64,
    /// Copy of the metric's diagnostics.
    #[serde(default)]
    pub details: MetricDetails,
}

impl MetricResult {
    /// Contribution of this metric to the weighted sum.
    pub fn contribution(&self) -> f64 {
        self.value * self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_name_round_trip() {
        for name in MetricName::ALL {
            assert_eq!(name.as_str().parse::<MetricName>().unwrap(), name);
        }
        assert!("bleu".parse::<MetricName>().is_err());
    }

    #[test]
    fn test_metric_name_serde() {
        let json = serde_json::to_string(&MetricName::SemanticSimilarity).unwrap();
        assert_eq!(json, "\"semantic_similarity\"");
    }

    #[test]
    fn test_weight_paths() {
        assert_eq!(
            MetricName::LengthRatio.weight_path(),
            "metrics.heuristics.length_ratio.weight"
        );
        assert_eq!(MetricName::SemanticSimilarity.weight_path(), "metrics.semantic.weight");
    }

    #[test]
    fn test_details_keep_insertion_order() {
        let outcome = MetricOutcome::new(80.0)
            .with_detail("ratio", 0.9)
            .with_detail("source_length", 13)
            .with_detail("target_length", 12);

        let keys: Vec<&str> = outcome.details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ratio", "source_length", "target_length"]);

        let json = serde_json::to_string(&outcome.details).unwrap();
        assert_eq!(json, r#"{"ratio":0.9,"source_length":13,"target_length":12}"#);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(MetricName::LanguageDetection.title(), "Language Detection");
        assert_eq!(title_case("semantic_similarity"), "Semantic Similarity");
        assert_eq!(title_case("REPETITION"), "Repetition");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_outcome_clamps_score() {
        assert_eq!(MetricOutcome::new(120.0).score, 100.0);
        assert_eq!(MetricOutcome::new(-3.0).score, 0.0);
        assert_eq!(MetricOutcome::new(f64::NAN).score, 0.0);
        assert_eq!(MetricOutcome::new(42.5).score, 42.5);
    }

    #[test]
    fn test_outcome_details() {
        let outcome = MetricOutcome::new(80.0)
            .with_detail("ratio", 1.25)
            .with_warning("careful");
        assert_eq!(outcome.detail_f64("ratio"), Some(1.25));
        assert_eq!(outcome.warning.as_deref(), Some("careful"));
    }
}
