//! Embedding backends for the semantic similarity metric.
//!
//! [`DefaultModelLoader`] serves:
//!
//! - `char-trigram-hash`: a built-in, offline feature-hashing embedder over
//!   character trigrams. It needs no download and is deterministic, which
//!   makes it suitable for smoke runs and tests. It only captures surface
//!   overlap, not cross-lingual meaning.
//! - with the `fastembed` feature, the sentence-transformer models listed in
//!   [`FASTEMBED_MODELS`], run through ONNX Runtime.
//!
//! Anything else is reported as [`EmbeddingError::ModelUnavailable`].

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::info;
use translation_benchmark_domain::{EmbeddingError, EmbeddingModel, ModelLoader};

/// Identifier of the built-in hashing embedder.
pub const HASHING_MODEL_ID: &str = "char-trigram-hash";

/// Sentence-transformer models served when the `fastembed` feature is on.
pub const FASTEMBED_MODELS: [&str; 3] = [
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2",
    "sentence-transformers/all-MiniLM-L6-v2",
    "intfloat/multilingual-e5-small",
];

/// Default vector length of the hashing embedder.
pub const HASHING_DIMENSIONS: usize = 256;

/// Deterministic character-trigram feature-hashing embedder.
///
/// Each lower-cased, space-padded text is cut into character trigrams; each
/// trigram adds +1 or -1 (by hash bit) to one of `dimensions` buckets. The
/// result is scaled to unit length. Same text, same vector.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    model_id: String,
    dimensions: usize,
}

impl HashingEmbedder {
    /// Embedder with [`HASHING_DIMENSIONS`] buckets.
    pub fn new() -> Self {
        Self::with_dimensions(HASHING_DIMENSIONS)
    }

    /// Embedder with a custom number of buckets (at least 1).
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            model_id: HASHING_MODEL_ID.to_string(),
            dimensions: dimensions.max(1),
        }
    }

    /// Vector length.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let padded: Vec<char> = std::iter::once(' ')
            .chain(text.to_lowercase().chars())
            .chain(std::iter::once(' '))
            .collect();

        let mut vector = vec![0.0f32; self.dimensions];
        for trigram in padded.windows(3) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let hash = hasher.finish();

            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let magnitude: f32 = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl EmbeddingModel for HashingEmbedder {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}

/// Loader for the models this build can serve.
#[derive(Debug, Clone, Default)]
pub struct DefaultModelLoader;

impl DefaultModelLoader {
    /// Create the loader.
    pub fn new() -> Self {
        Self
    }

    /// Model identifiers this build can load.
    pub fn available_models() -> Vec<&'static str> {
        let mut models = vec![HASHING_MODEL_ID];
        if cfg!(feature = "fastembed") {
            models.extend(FASTEMBED_MODELS);
        }
        models
    }
}

impl ModelLoader for DefaultModelLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError> {
        if model_id == HASHING_MODEL_ID {
            info!(model = model_id, "Using built-in hashing embedder");
            return Ok(Arc::new(HashingEmbedder::new()));
        }

        if let Some(loaded) = load_fastembed(model_id) {
            return loaded;
        }

        let reason = if FASTEMBED_MODELS.contains(&model_id) {
            "build with the `fastembed` feature to enable sentence-transformer models".to_string()
        } else {
            format!("available models: {}", Self::available_models().join(", "))
        };

        Err(EmbeddingError::ModelUnavailable {
            model: model_id.to_string(),
            reason,
        })
    }
}

#[cfg(feature = "fastembed")]
fn load_fastembed(model_id: &str) -> Option<Result<Arc<dyn EmbeddingModel>, EmbeddingError>> {
    let model = fastembed_backend::FastEmbedModel::supported(model_id)?;
    Some(
        fastembed_backend::FastEmbedModel::load(model_id, model)
            .map(|m| Arc::new(m) as Arc<dyn EmbeddingModel>),
    )
}

#[cfg(not(feature = "fastembed"))]
fn load_fastembed(_model_id: &str) -> Option<Result<Arc<dyn EmbeddingModel>, EmbeddingError>> {
    None
}

#[cfg(feature = "fastembed")]
mod fastembed_backend {
    use fastembed::{EmbeddingModel as FastModel, InitOptions, TextEmbedding};
    use parking_lot::Mutex;
    use tracing::info;
    use translation_benchmark_domain::{EmbeddingError, EmbeddingModel};

    /// Sentence-transformer model run through ONNX Runtime.
    ///
    /// Inference goes through a mutex; concurrent callers queue.
    pub struct FastEmbedModel {
        model_id: String,
        inner: Mutex<TextEmbedding>,
    }

    impl FastEmbedModel {
        pub fn supported(model_id: &str) -> Option<FastModel> {
            match model_id {
                "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2" => {
                    Some(FastModel::ParaphraseMLMiniLML12V2)
                }
                "sentence-transformers/all-MiniLM-L6-v2" => Some(FastModel::AllMiniLML6V2),
                "intfloat/multilingual-e5-small" => Some(FastModel::MultilingualE5Small),
                _ => None,
            }
        }

        pub fn load(model_id: &str, model: FastModel) -> Result<Self, EmbeddingError> {
            info!(model = model_id, "Loading sentence-transformer model");
            let inner = TextEmbedding::try_new(
                InitOptions::new(model).with_show_download_progress(false),
            )
            .map_err(|e| EmbeddingError::ModelUnavailable {
                model: model_id.to_string(),
                reason: e.to_string(),
            })?;

            Ok(Self {
                model_id: model_id.to_string(),
                inner: Mutex::new(inner),
            })
        }
    }

    impl EmbeddingModel for FastEmbedModel {
        fn model_id(&self) -> &str {
            &self.model_id
        }

        fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            self.inner
                .lock()
                .embed(texts.to_vec(), None)
                .map_err(|e| EmbeddingError::Encoding(e.to_string()))
        }
    }
}
