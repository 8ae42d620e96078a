//! Supported languages and the language detection port.

use serde::{Deserialize, Serialize};

/// ISO 639-1 codes of the target languages the benchmark supports.
pub const SUPPORTED_LANGUAGES: [&str; 12] = [
    "en", "es", "fr", "de", "it", "pt", "zh", "ja", "ko", "ru", "ar", "hi",
];

/// Whether `code` is one of the supported ISO 639-1 codes.
pub fn is_supported(code: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&code)
}

/// One candidate language with the detector's confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProbability {
    /// Language code (ISO 639-1 where known)
    pub lang: String,
    /// Confidence in `[0, 1]`
    pub prob: f64,
}

impl LanguageProbability {
    /// Create a candidate, clamping the probability into `[0, 1]`.
    pub fn new(lang: impl Into<String>, prob: f64) -> Self {
        Self {
            lang: lang.into(),
            prob: if prob.is_finite() { prob.clamp(0.0, 1.0) } else { 0.0 },
        }
    }
}

/// Failure of a language detection backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    /// The backend could not process the text
    #[error("detector could not process text: {0}")]
    Failed(String),
}

/// Detects the dominant language of a text.
pub trait LanguageDetector: Send + Sync {
    /// Candidate languages, ranked by descending confidence.
    ///
    /// An empty list means no language could be identified.
    fn detect(&self, text: &str) -> Result<Vec<LanguageProbability>, DetectionError>;
}
