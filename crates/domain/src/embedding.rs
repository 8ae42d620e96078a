//! Embedding model ports.

use std::sync::Arc;

/// Failure of an embedding backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbeddingError {
    /// The requested model cannot be served
    #[error("Model '{model}' is unavailable: {reason}")]
    ModelUnavailable {
        /// Requested model identifier
        model: String,
        /// Why it could not be loaded
        reason: String,
    },

    /// The model failed to encode the input
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Two vectors that should be comparable have different lengths
    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Length of the first vector
        left: usize,
        /// Length of the second vector
        right: usize,
    },

    /// A blocking task running the model panicked or was cancelled
    #[error("Embedding task failed: {0}")]
    TaskFailed(String),
}

/// A loaded sentence embedding model.
///
/// Implementations must tolerate concurrent calls, serialising internally if
/// the underlying runtime is not reentrant.
pub trait EmbeddingModel: Send + Sync {
    /// Identifier the model was loaded from.
    fn model_id(&self) -> &str;

    /// Encode each text into a fixed-length vector.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Builds embedding models from identifiers.
pub trait ModelLoader: Send + Sync {
    /// Load the model named `model_id`. May block.
    fn load(&self, model_id: &str) -> Result<Arc<dyn EmbeddingModel>, EmbeddingError>;
}
