//! Evaluation orchestrator.
//!
//! The [`Evaluator`] is the only component that reads configuration: it
//! decides which metrics run, builds them with their resolved parameters,
//! runs them over a request and hands the outcomes to [`ScoreFusion`].

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use translation_benchmark_common::{AppConfig, EngineConfig, MetricsConfig};
use translation_benchmark_domain::language::{is_supported, SUPPORTED_LANGUAGES};
use translation_benchmark_domain::{
    EvaluationResult, LanguageDetector, MetricName, MetricOutcome, ModelLoader, TranslationId,
};
use validator::Validate;

use super::embedding::DefaultModelLoader;
use super::fusion::ScoreFusion;
use super::metrics::{
    LanguageMatchMetric, LengthRatioMetric, Metric, MetricInput, PreservationMetric,
    RepetitionMetric, SemanticSimilarityMetric, WhatlangDetector,
};
use crate::{ApplicationError, ApplicationResult};

/// One provider translation to score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Identifier echoed back on the result
    pub translation_id: TranslationId,
    /// Provider that produced the translation
    pub provider_name: String,
    /// Model used by the provider
    pub model_id: String,
    /// Text that was translated
    pub source_text: String,
    /// Provider output
    pub target_text: String,
    /// Requested ISO 639-1 target language
    pub target_lang: String,
    /// Source language, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    /// Human reference translation. Accepted but not scored against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_translation: Option<String>,
}

impl EvaluationRequest {
    /// Request for a source/target pair.
    pub fn new(
        translation_id: impl Into<TranslationId>,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            translation_id: translation_id.into(),
            provider_name: provider_name.into(),
            model_id: model_id.into(),
            source_text: source_text.into(),
            target_text: target_text.into(),
            target_lang: target_lang.into(),
            source_lang: None,
            reference_translation: None,
        }
    }

    /// Set the source language.
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }

    /// Attach a reference translation.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_translation = Some(reference.into());
        self
    }

    /// Reject target languages outside the supported set.
    ///
    /// The evaluator itself accepts any code; callers that front user input
    /// run this first.
    pub fn ensure_supported_language(&self) -> ApplicationResult<()> {
        if is_supported(&self.target_lang) {
            Ok(())
        } else {
            Err(ApplicationError::InvalidInput(format!(
                "unsupported target language '{}', expected one of: {}",
                self.target_lang,
                SUPPORTED_LANGUAGES.join(", ")
            )))
        }
    }

    fn metric_input(&self) -> MetricInput<'_> {
        MetricInput {
            source_text: &self.source_text,
            target_text: &self.target_text,
            target_lang: &self.target_lang,
            source_lang: self.source_lang.as_deref(),
        }
    }
}

/// Runs the configured metrics and fuses their outcomes.
pub struct Evaluator {
    metrics: Vec<Arc<dyn Metric>>,
    fusion: ScoreFusion,
    max_concurrent: usize,
}

impl Evaluator {
    /// Build an evaluator with the default backends.
    pub fn new(config: &AppConfig) -> ApplicationResult<Self> {
        EvaluatorBuilder::new().config(config).build()
    }

    /// Start building an evaluator.
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::new()
    }

    /// Metrics that will run, in evaluation order.
    pub fn metric_names(&self) -> Vec<MetricName> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Fusion step used by this evaluator.
    pub fn fusion(&self) -> &ScoreFusion {
        &self.fusion
    }

    /// Score one translation.
    ///
    /// Never fails: metric problems surface as warnings on the result.
    #[instrument(
        skip(self, request),
        fields(translation_id = %request.translation_id, provider = %request.provider_name)
    )]
    pub async fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResult {
        info!(
            metrics = self.metrics.len(),
            target_lang = %request.target_lang,
            "Starting evaluation"
        );

        let input = request.metric_input();
        let results = join_all(self.metrics.iter().map(|metric| async move {
            (metric.name(), metric.evaluate(&input).await)
        }))
        .await;

        let outcomes: IndexMap<MetricName, MetricOutcome> = results.into_iter().collect();
        for (name, outcome) in &outcomes {
            debug!(metric = %name, score = outcome.score, warning = ?outcome.warning, "Metric evaluated");
        }

        let score_breakdown = self.fusion.fuse(&outcomes);

        info!(
            overall_score = score_breakdown.overall_score,
            warnings = score_breakdown.warnings.len(),
            "Evaluation complete"
        );

        EvaluationResult {
            translation_id: request.translation_id.clone(),
            provider_name: request.provider_name.clone(),
            model_id: request.model_id.clone(),
            score_breakdown,
        }
    }

    /// Score many translations concurrently, bounded by
    /// `max_concurrent_evaluations`. Results come back in request order.
    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub async fn evaluate_batch(&self, requests: Vec<EvaluationRequest>) -> Vec<EvaluationResult> {
        stream::iter(requests)
            .map(|request| async move { self.evaluate(&request).await })
            .buffered(self.max_concurrent)
            .collect()
            .await
    }
}

/// Builder for [`Evaluator`]
pub struct EvaluatorBuilder {
    metrics: MetricsConfig,
    engine: EngineConfig,
    detector: Option<Arc<dyn LanguageDetector>>,
    loader: Option<Arc<dyn ModelLoader>>,
}

impl EvaluatorBuilder {
    pub fn new() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            engine: EngineConfig::default(),
            detector: None,
            loader: None,
        }
    }

    /// Take metric and engine settings from a loaded configuration.
    pub fn config(mut self, config: &AppConfig) -> Self {
        self.metrics = config.metrics.clone();
        self.engine = config.engine.clone();
        self
    }

    pub fn metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn max_concurrent_evaluations(mut self, max: usize) -> Self {
        self.engine.max_concurrent_evaluations = max;
        self
    }

    /// Replace the whatlang backed detector.
    pub fn language_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Replace the default embedding model loader.
    pub fn model_loader(mut self, loader: Arc<dyn ModelLoader>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Validate the settings and construct the enabled metrics.
    pub fn build(self) -> ApplicationResult<Evaluator> {
        self.metrics.validate()?;
        self.engine.validate()?;

        let mut metrics: Vec<Arc<dyn Metric>> = Vec::new();
        for name in self.metrics.enabled_metrics() {
            metrics.push(self.build_metric(name));
        }

        debug!(metrics = ?metrics.iter().map(|m| m.name()).collect::<Vec<_>>(), "Evaluator built");

        Ok(Evaluator {
            fusion: ScoreFusion::new(&self.metrics),
            max_concurrent: self.engine.max_concurrent_evaluations,
            metrics,
        })
    }

    fn build_metric(&self, name: MetricName) -> Arc<dyn Metric> {
        let h = &self.metrics.heuristics;
        match name {
            MetricName::LanguageDetection => {
                let detector = self
                    .detector
                    .clone()
                    .unwrap_or_else(|| Arc::new(WhatlangDetector::new()));
                Arc::new(LanguageMatchMetric::new(
                    detector,
                    h.language_detection.confidence_threshold,
                ))
            }
            MetricName::LengthRatio => Arc::new(LengthRatioMetric::new(
                h.length_ratio.min_ratio,
                h.length_ratio.max_ratio,
            )),
            MetricName::Repetition => Arc::new(RepetitionMetric::new(
                h.repetition.max_ngram_size,
                h.repetition.threshold,
            )),
            MetricName::Preservation => Arc::new(PreservationMetric::new(
                h.preservation.check_numbers,
                h.preservation.check_punctuation,
                h.preservation.check_entities,
            )),
            MetricName::SemanticSimilarity => {
                let loader = self
                    .loader
                    .clone()
                    .unwrap_or_else(|| Arc::new(DefaultModelLoader::new()));
                Arc::new(SemanticSimilarityMetric::new(
                    self.metrics.semantic.model.clone(),
                    loader,
                ))
            }
        }
    }
}

impl Default for EvaluatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_metric_order() {
        let evaluator = Evaluator::builder().build().unwrap();
        assert_eq!(
            evaluator.metric_names(),
            vec![
                MetricName::LanguageDetection,
                MetricName::LengthRatio,
                MetricName::Repetition,
                MetricName::Preservation,
            ]
        );
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let mut metrics = MetricsConfig::default();
        metrics.heuristics.length_ratio.min_ratio = 1.5;

        let err = Evaluator::builder().metrics(metrics).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        let result = Evaluator::builder().max_concurrent_evaluations(0).build();
        assert!(matches!(result, Err(ApplicationError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_supported_language_check() {
        let request = EvaluationRequest::new(1_i64, "deepl", "default", "Hello", "Hola", "es");
        assert!(request.ensure_supported_language().is_ok());

        let request = EvaluationRequest::new(1_i64, "deepl", "default", "Hello", "Hallo", "nl");
        let err = request.ensure_supported_language().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
