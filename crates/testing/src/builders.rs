//! Fluent builder pattern for constructing test data.
//!
//! This module provides builders for metric configurations and evaluation
//! results with a fluent API for customization.

use translation_benchmark_common::MetricsConfig;
use translation_benchmark_domain::{
    EvaluationResult, MetricDetails, MetricName, MetricResult, ScoreBreakdown, TranslationId,
};

/// Builder for [`MetricsConfig`] instances
#[derive(Clone)]
pub struct MetricsConfigBuilder {
    config: MetricsConfig,
}

impl MetricsConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: MetricsConfig::default(),
        }
    }

    /// Start with every metric disabled.
    pub fn none() -> Self {
        Self {
            config: MetricsConfig::all_disabled(),
        }
    }

    pub fn language_detection(mut self, weight: f64) -> Self {
        let m = &mut self.config.heuristics.language_detection;
        m.enabled = true;
        m.weight = weight;
        self
    }

    pub fn length_ratio(mut self, weight: f64) -> Self {
        let m = &mut self.config.heuristics.length_ratio;
        m.enabled = true;
        m.weight = weight;
        self
    }

    pub fn repetition(mut self, weight: f64) -> Self {
        let m = &mut self.config.heuristics.repetition;
        m.enabled = true;
        m.weight = weight;
        self
    }

    pub fn preservation(mut self, weight: f64) -> Self {
        let m = &mut self.config.heuristics.preservation;
        m.enabled = true;
        m.weight = weight;
        self
    }

    pub fn semantic(mut self, weight: f64, model: impl Into<String>) -> Self {
        let m = &mut self.config.semantic;
        m.enabled = true;
        m.weight = weight;
        m.model = model.into();
        self
    }

    pub fn disable(mut self, metric: MetricName) -> Self {
        let h = &mut self.config.heuristics;
        match metric {
            MetricName::LanguageDetection => h.language_detection.enabled = false,
            MetricName::LengthRatio => h.length_ratio.enabled = false,
            MetricName::Repetition => h.repetition.enabled = false,
            MetricName::Preservation => h.preservation.enabled = false,
            MetricName::SemanticSimilarity => self.config.semantic.enabled = false,
        }
        self
    }

    pub fn with_confidence_threshold(mut self, threshold: f64) -> Self {
        self.config.heuristics.language_detection.confidence_threshold = threshold;
        self
    }

    pub fn with_ratio_band(mut self, min_ratio: f64, max_ratio: f64) -> Self {
        let m = &mut self.config.heuristics.length_ratio;
        m.min_ratio = min_ratio;
        m.max_ratio = max_ratio;
        self
    }

    pub fn with_preservation_checks(mut self, numbers: bool, punctuation: bool, entities: bool) -> Self {
        let m = &mut self.config.heuristics.preservation;
        m.check_numbers = numbers;
        m.check_punctuation = punctuation;
        m.check_entities = entities;
        self
    }

    pub fn build(self) -> MetricsConfig {
        self.config
    }
}

impl Default for MetricsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`EvaluationResult`] test instances
#[derive(Clone)]
pub struct EvaluationResultBuilder {
    translation_id: TranslationId,
    provider_name: String,
    model_id: String,
    overall_score: f64,
    metrics: Vec<MetricResult>,
    warnings: Vec<String>,
    explanation: String,
}

impl EvaluationResultBuilder {
    pub fn new() -> Self {
        Self {
            translation_id: TranslationId::generate(),
            provider_name: "openai".to_string(),
            model_id: "gpt-4".to_string(),
            overall_score: 0.0,
            metrics: Vec::new(),
            warnings: Vec::new(),
            explanation: String::new(),
        }
    }

    pub fn with_translation_id(mut self, id: impl Into<TranslationId>) -> Self {
        self.translation_id = id.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.provider_name = provider.into();
        self.model_id = model.into();
        self
    }

    pub fn with_overall_score(mut self, score: f64) -> Self {
        self.overall_score = score;
        self
    }

    pub fn with_metric(mut self, name: MetricName, value: f64, weight: f64) -> Self {
        self.metrics.push(MetricResult {
            name: name.as_str().to_string(),
            value,
            weight,
            details: MetricDetails::new(),
        });
        self
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn build(self) -> EvaluationResult {
        EvaluationResult {
            translation_id: self.translation_id,
            provider_name: self.provider_name,
            model_id: self.model_id,
            score_breakdown: ScoreBreakdown {
                overall_score: self.overall_score,
                metrics: self.metrics,
                warnings: self.warnings,
                explanation: self.explanation,
            },
        }
    }
}

impl Default for EvaluationResultBuilder {
    fn default() -> Self {
        Self::new()
    }
}
