//! Cross-lingual semantic similarity.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{
    EmbeddingError, EmbeddingModel, MetricName, MetricOutcome, ModelLoader,
};

use super::{Metric, MetricInput};

/// Cosine similarity of two vectors; 0 when either has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, EmbeddingError> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Run blocking model work on Tokio's blocking pool, or inline when no
/// Tokio runtime is driving the caller.
async fn run_blocking<T, F>(work: F) -> Result<T, EmbeddingError>
where
    F: FnOnce() -> Result<T, EmbeddingError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(work)
            .await
            .map_err(|e| EmbeddingError::TaskFailed(e.to_string()))?,
        Err(_) => work(),
    }
}

/// Embeds source and target with a shared multilingual model and scores
/// their cosine similarity; negative similarity scores 0.
///
/// The model is loaded on first use and kept for the lifetime of the
/// metric. Concurrent first calls trigger a single load. A failed load
/// leaves the slot empty, so a later evaluation tries again.
///
/// Loading and encoding run on Tokio's blocking pool when a Tokio runtime is
/// present. Under any other executor they run inline on the polling thread.
pub struct SemanticSimilarityMetric {
    model_id: String,
    loader: Arc<dyn ModelLoader>,
    model: OnceCell<Arc<dyn EmbeddingModel>>,
}

impl SemanticSimilarityMetric {
    /// Create the metric; nothing is loaded until the first evaluation.
    pub fn new(model_id: impl Into<String>, loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            model_id: model_id.into(),
            loader,
            model: OnceCell::new(),
        }
    }

    /// Configured model identifier.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Whether the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.model.initialized()
    }

    async fn model(&self) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError> {
        let model = self
            .model
            .get_or_try_init(|| async {
                info!(model = %self.model_id, "Loading embedding model");
                let loader = Arc::clone(&self.loader);
                let model_id = self.model_id.clone();
                let model = run_blocking(move || loader.load(&model_id)).await?;
                info!(model = %self.model_id, "Embedding model loaded");
                Ok::<_, EmbeddingError>(model)
            })
            .await?;
        Ok(Arc::clone(model))
    }

    async fn similarity(&self, source: &str, target: &str) -> Result<f64, EmbeddingError> {
        let model = self.model().await?;
        let (source, target) = (source.to_string(), target.to_string());

        let embeddings =
            run_blocking(move || model.encode(&[source.as_str(), target.as_str()])).await?;

        match embeddings.as_slice() {
            [source_vec, target_vec] => cosine_similarity(source_vec, target_vec),
            other => Err(EmbeddingError::Encoding(format!(
                "expected 2 embeddings, got {}",
                other.len()
            ))),
        }
    }
}

#[async_trait]
impl Metric for SemanticSimilarityMetric {
    #[instrument(skip(self, input), fields(metric = "semantic_similarity", model = %self.model_id))]
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome {
        if input.source_text.is_empty() || input.target_text.is_empty() {
            return MetricOutcome::degenerate(warnings::EMPTY_TEXT).with_detail("similarity", 0.0);
        }

        match self.similarity(input.source_text, input.target_text).await {
            Ok(similarity) => {
                let score = similarity.max(0.0) * 100.0;
                debug!(similarity = similarity, score = score, "Semantic similarity");
                MetricOutcome::new(score)
                    .with_detail("similarity", similarity)
                    .with_detail("model", &self.model_id)
            }
            Err(error) => {
                warn!(error = %error, "Semantic similarity calculation failed");
                MetricOutcome::degenerate(format!("Similarity calculation error: {}", error))
                    .with_detail("similarity", 0.0)
            }
        }
    }

    fn name(&self) -> MetricName {
        MetricName::SemanticSimilarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap().abs() < 1e-12);
        assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_evaluates_without_tokio_runtime() {
        let metric = SemanticSimilarityMetric::new(
            crate::scoring::HASHING_MODEL_ID,
            Arc::new(crate::scoring::DefaultModelLoader::new()),
        );
        let input = MetricInput::new("The cat sleeps.", "The cat sleeps.", "en");

        let outcome = futures::executor::block_on(metric.evaluate(&input));

        assert!(metric.is_loaded());
        assert!(outcome.warning.is_none());
        assert!((outcome.score - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let err = cosine_similarity(&[1.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, EmbeddingError::DimensionMismatch { left: 1, right: 2 });
    }
}
