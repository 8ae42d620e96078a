//! Test fixtures: sentence pairs and evaluation results.
//!
//! Curated pairs have known properties (clean, truncated, looping, ...);
//! generated text uses `fake` for volume.

use fake::{
    faker::{
        company::en::CompanyName,
        lorem::en::{Sentence, Words},
    },
    Fake,
};
use translation_benchmark_domain::{EvaluationResult, TranslationId};

use crate::builders::EvaluationResultBuilder;

/// A source text with one provider output.
#[derive(Debug, Clone, PartialEq)]
pub struct SentencePair {
    pub source_text: String,
    pub target_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

impl SentencePair {
    pub fn new(
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: target_text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

/// Faithful English to Spanish translation.
pub fn clean_pair() -> SentencePair {
    SentencePair::new(
        "The meeting with Maria starts at 10:30 on Monday, and it will last 45 minutes.",
        "La reunión con Maria empieza a las 10:30 el lunes, y durará 45 minutos.",
        "en",
        "es",
    )
}

/// Output that stops after a few words.
pub fn truncated_pair() -> SentencePair {
    SentencePair::new(
        "The quarterly report shows revenue growth of 12% across all European markets.",
        "El informe",
        "en",
        "es",
    )
}

/// Output stuck in a generation loop.
pub fn looping_pair() -> SentencePair {
    SentencePair::new(
        "Thank you for your order.",
        "gracias gracias gracias gracias gracias gracias gracias gracias",
        "en",
        "es",
    )
}

/// Output that drops the numbers and names of the source.
pub fn lossy_pair() -> SentencePair {
    SentencePair::new(
        "Berlin and Paris signed 3 agreements worth 2.5 billion in 2023.",
        "dos ciudades firmaron varios acuerdos el año pasado",
        "en",
        "es",
    )
}

/// Output with nothing in it.
pub fn empty_target_pair() -> SentencePair {
    SentencePair::new("Good morning, everyone.", "   ", "en", "es")
}

/// A random lorem ipsum sentence.
pub fn create_test_sentence() -> String {
    Sentence(6..14).fake()
}

/// A random lowercase word list, joined by spaces.
pub fn create_test_words(count: usize) -> String {
    let words: Vec<String> = Words(count..count + 1).fake();
    words.join(" ")
}

/// A random provider name.
pub fn create_test_provider_name() -> String {
    CompanyName().fake()
}

/// Evaluation result with the given provider and overall score.
pub fn create_test_evaluation_result(provider: &str, overall_score: f64) -> EvaluationResult {
    EvaluationResultBuilder::new()
        .with_translation_id(TranslationId::generate())
        .with_provider(provider, "default")
        .with_overall_score(overall_score)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_pairs_target_spanish() {
        for pair in [clean_pair(), truncated_pair(), looping_pair(), lossy_pair()] {
            assert_eq!(pair.target_lang, "es");
            assert!(!pair.source_text.is_empty());
        }
        assert!(empty_target_pair().target_text.trim().is_empty());
    }

    #[test]
    fn test_generated_words() {
        let text = create_test_words(5);
        assert_eq!(text.split_whitespace().count(), 5);
    }

    #[test]
    fn test_generated_sentence() {
        assert!(!create_test_sentence().is_empty());
        assert!(!create_test_provider_name().is_empty());
    }
}
