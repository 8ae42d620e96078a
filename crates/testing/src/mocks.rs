//! Mock backends for the language detector and embedding ports.
//!
//! All mocks are deterministic and record how often they were called so
//! tests can assert on laziness and sharing.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use translation_benchmark_domain::{
    DetectionError, EmbeddingError, EmbeddingModel, LanguageDetector, LanguageProbability,
    ModelLoader,
};

/// Detector returning a fixed candidate list for every text.
pub struct StubDetector {
    candidates: Vec<LanguageProbability>,
    seen: Arc<RwLock<Vec<String>>>,
}

impl StubDetector {
    pub fn new(candidates: Vec<LanguageProbability>) -> Self {
        Self {
            candidates,
            seen: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// One candidate language.
    pub fn single(lang: &str, prob: f64) -> Self {
        Self::new(vec![LanguageProbability::new(lang, prob)])
    }

    /// No candidates at all.
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    /// Texts the detector was asked about, in call order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.seen.read().len()
    }
}

impl LanguageDetector for StubDetector {
    fn detect(&self, text: &str) -> Result<Vec<LanguageProbability>, DetectionError> {
        self.seen.write().push(text.to_string());
        Ok(self.candidates.clone())
    }
}

/// Detector that always errors.
pub struct FailingDetector {
    message: String,
}

impl FailingDetector {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingDetector {
    fn default() -> Self {
        Self::new("no features in text")
    }
}

impl LanguageDetector for FailingDetector {
    fn detect(&self, _text: &str) -> Result<Vec<LanguageProbability>, DetectionError> {
        Err(DetectionError::Failed(self.message.clone()))
    }
}

/// Embedding model with canned vectors.
///
/// Texts without a canned vector encode to `fallback`.
pub struct StubEmbeddingModel {
    model_id: String,
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
    encode_calls: AtomicUsize,
}

impl StubEmbeddingModel {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            vectors: HashMap::new(),
            fallback: vec![1.0, 0.0, 0.0],
            encode_calls: AtomicUsize::new(0),
        }
    }

    /// Encode `text` as `vector`.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Vector used for texts without a canned one.
    pub fn with_fallback(mut self, vector: Vec<f32>) -> Self {
        self.fallback = vector;
        self
    }

    pub fn encode_calls(&self) -> usize {
        self.encode_calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingModel for StubEmbeddingModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(*text)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect())
    }
}

/// Embedding model whose encode step always fails.
pub struct BrokenEmbeddingModel;

impl EmbeddingModel for BrokenEmbeddingModel {
    fn model_id(&self) -> &str {
        "broken"
    }

    fn encode(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Encoding("tensor shape mismatch".to_string()))
    }
}

/// Loader handing out one shared model and counting load calls.
///
/// An optional delay keeps the load in flight long enough for concurrent
/// callers to pile up behind it.
pub struct CountingModelLoader {
    model: Arc<dyn EmbeddingModel>,
    loads: AtomicUsize,
    requested: Mutex<Vec<String>>,
    delay: Duration,
}

impl CountingModelLoader {
    pub fn new(model: Arc<dyn EmbeddingModel>) -> Self {
        Self {
            model,
            loads: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Model ids passed to `load`, in call order.
    pub fn requested_models(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

impl ModelLoader for CountingModelLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.requested.lock().push(model_id.to_string());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(Arc::clone(&self.model))
    }
}

/// Loader that never produces a model.
pub struct FailingModelLoader {
    attempts: AtomicUsize,
}

impl FailingModelLoader {
    pub fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for FailingModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader for FailingModelLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(EmbeddingError::ModelUnavailable {
            model: model_id.to_string(),
            reason: "weights not found".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_detector_records_calls() {
        let detector = StubDetector::single("fr", 0.9);
        let candidates = detector.detect("Bonjour").unwrap();

        assert_eq!(candidates[0].lang, "fr");
        assert_eq!(detector.seen_texts(), vec!["Bonjour"]);
    }

    #[test]
    fn test_stub_model_uses_canned_vectors() {
        let model = StubEmbeddingModel::new("stub").with_vector("a", vec![0.0, 1.0]);
        let vectors = model.encode(&["a", "b"]).unwrap();

        assert_eq!(vectors[0], vec![0.0, 1.0]);
        assert_eq!(vectors[1], vec![1.0, 0.0, 0.0]);
        assert_eq!(model.encode_calls(), 1);
    }

    #[test]
    fn test_counting_loader() {
        let loader = CountingModelLoader::new(Arc::new(StubEmbeddingModel::new("stub")));
        loader.load("m1").unwrap();
        loader.load("m2").unwrap();

        assert_eq!(loader.load_count(), 2);
        assert_eq!(loader.requested_models(), vec!["m1", "m2"]);
    }

    #[test]
    fn test_failing_loader() {
        let loader = FailingModelLoader::new();
        assert!(loader.load("m").is_err());
        assert_eq!(loader.attempts(), 1);
    }
}
