//! Behaviour of the individual metrics
//!
//! Language detection runs against stub detectors so the expected outcome
//! does not depend on a statistical model; a separate block exercises the
//! whatlang backend on long, unambiguous sentences.

use std::sync::Arc;
use translation_benchmark_application::scoring::{
    LanguageMatchMetric, LengthRatioMetric, PreservationMetric, RepetitionMetric,
    SemanticSimilarityMetric, HASHING_MODEL_ID,
};
use translation_benchmark_application::{DefaultModelLoader, Metric, MetricInput, WhatlangDetector};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{LanguageProbability, MetricOutcome};
use translation_benchmark_testing::mocks::*;

fn component(outcome: &MetricOutcome, key: &str) -> f64 {
    outcome.details["component_scores"][key].as_f64().unwrap()
}

fn language_metric(detector: impl translation_benchmark_domain::LanguageDetector + 'static) -> LanguageMatchMetric {
    LanguageMatchMetric::new(Arc::new(detector), 0.8)
}

// Language match

#[tokio::test]
async fn test_language_match_spanish() {
    let metric = language_metric(StubDetector::single("es", 0.97));
    let outcome = metric
        .evaluate(&MetricInput::new("Hello, world!", "¡Hola, mundo!", "es"))
        .await;

    assert_eq!(outcome.details["matches_target"], true);
    assert!(outcome.score > 0.0);
    assert_eq!(outcome.score, 100.0);
    assert!(outcome.warning.is_none());
}

#[tokio::test]
async fn test_language_mismatch_french() {
    let metric = language_metric(StubDetector::single("fr", 0.95));
    let outcome = metric
        .evaluate(&MetricInput::new("Hello, world!", "Bonjour, monde!", "es"))
        .await;

    assert_eq!(outcome.details["matches_target"], false);
    assert_eq!(outcome.score, 0.0);
    assert_eq!(
        outcome.warning.as_deref(),
        Some("Language mismatch: expected 'es', detected 'fr'")
    );
}

#[tokio::test]
async fn test_language_low_confidence_scales_score() {
    let metric = language_metric(StubDetector::new(vec![
        LanguageProbability::new("es", 0.6),
        LanguageProbability::new("pt", 0.3),
    ]));
    let outcome = metric
        .evaluate(&MetricInput::new("Hello", "Hola amigo", "es"))
        .await;

    assert!((outcome.score - 60.0).abs() < 1e-9);
    assert_eq!(outcome.warning.as_deref(), Some(warnings::LOW_CONFIDENCE));
    assert_eq!(outcome.details["all_probabilities"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_language_threshold_is_inclusive() {
    let metric = language_metric(StubDetector::single("es", 0.8));
    let outcome = metric.evaluate(&MetricInput::new("Hi", "Hola", "es")).await;
    assert_eq!(outcome.score, 100.0);
}

#[tokio::test]
async fn test_language_undetected() {
    let metric = language_metric(StubDetector::silent());
    let outcome = metric.evaluate(&MetricInput::new("Hi", "???", "es")).await;

    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.warning.as_deref(), Some(warnings::UNDETECTED_LANGUAGE));
}

#[tokio::test]
async fn test_language_detector_failure_is_neutral() {
    let metric = language_metric(FailingDetector::new("no features in text"));
    let outcome = metric.evaluate(&MetricInput::new("Hi", "1234", "es")).await;

    assert_eq!(outcome.score, 50.0);
    let warning = outcome.warning.unwrap();
    assert!(warning.starts_with("Language detection error: "), "{}", warning);
    assert!(warning.contains("no features in text"));
    assert!(outcome.details["matches_target"].is_null());
}

#[tokio::test]
async fn test_language_empty_target_skips_detector() {
    let detector = Arc::new(StubDetector::single("es", 1.0));
    let metric = LanguageMatchMetric::new(detector.clone(), 0.8);
    let outcome = metric.evaluate(&MetricInput::new("Hi", "  \n", "es")).await;

    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.warning.as_deref(), Some(warnings::EMPTY_TRANSLATION));
    assert_eq!(detector.call_count(), 0);
}

#[tokio::test]
async fn test_whatlang_detects_spanish() {
    let metric = LanguageMatchMetric::new(Arc::new(WhatlangDetector::new()), 0.8);
    let outcome = metric
        .evaluate(&MetricInput::new(
            "The weather is lovely today and we are going to the beach with the children.",
            "Hoy hace un tiempo estupendo y vamos a ir a la playa con los niños después de comer.",
            "es",
        ))
        .await;

    assert_eq!(outcome.details["matches_target"], true);
    assert_eq!(outcome.details["detected_lang"], "es");
    assert!(outcome.score > 0.0);
}

#[tokio::test]
async fn test_whatlang_flags_wrong_language() {
    let metric = LanguageMatchMetric::new(Arc::new(WhatlangDetector::new()), 0.8);
    let outcome = metric
        .evaluate(&MetricInput::new(
            "The weather is lovely today and we are going to the beach with the children.",
            "Aujourd'hui il fait un temps magnifique et nous allons à la plage avec les enfants.",
            "es",
        ))
        .await;

    assert_eq!(outcome.details["matches_target"], false);
    assert_eq!(outcome.score, 0.0);
    assert!(outcome.warning.unwrap().starts_with("Language mismatch"));
}

#[tokio::test]
async fn test_whatlang_text_without_letters_is_neutral() {
    let metric = LanguageMatchMetric::new(Arc::new(WhatlangDetector::new()), 0.8);

    for target in ["2024", "100%"] {
        let outcome = metric.evaluate(&MetricInput::new(target, target, "es")).await;

        assert_eq!(outcome.score, 50.0, "target {:?}", target);
        assert!(outcome
            .warning
            .as_deref()
            .unwrap()
            .starts_with("Language detection error"));
        assert!(outcome.details["matches_target"].is_null());
    }
}

// Length ratio

#[tokio::test]
async fn test_length_ratio_equal_lengths() {
    let metric = LengthRatioMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new("Hello, world!", "¡Hola, mundo!", "es"))
        .await;

    assert!((outcome.detail_f64("ratio").unwrap() - 1.0).abs() < 1e-9);
    assert!(outcome.score > 50.0);
    assert!(outcome.warning.is_none());
}

#[tokio::test]
async fn test_length_ratio_truncated() {
    let metric = LengthRatioMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new(
            "This is a very long sentence with many words.",
            "Short",
            "en",
        ))
        .await;

    assert!(outcome.detail_f64("ratio").unwrap() < 0.5);
    assert!(outcome.score < 50.0);
    let warning = outcome.warning.unwrap();
    assert!(warning.contains("too short"), "{}", warning);
    assert!(warning.contains("(ratio: 0.11)"), "{}", warning);
}

#[tokio::test]
async fn test_length_ratio_padded() {
    let metric = LengthRatioMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new("Yes", "Sí, claro que sí, por supuesto", "es"))
        .await;

    assert!(outcome.score < 50.0);
    assert!(outcome.warning.unwrap().contains("too long"));
}

#[tokio::test]
async fn test_length_ratio_custom_band() {
    let metric = LengthRatioMetric::new(0.8, 1.25);
    let outcome = metric
        .evaluate(&MetricInput::new("abcdefghij", "abcdefg", "en"))
        .await;

    // ratio 0.7 is below the narrower band
    assert!(outcome.warning.is_some());
    assert!((outcome.score - 0.7 / 0.8 * 50.0).abs() < 1e-9);
}

// Repetition

#[tokio::test]
async fn test_repetition_unique_sentence() {
    let metric = RepetitionMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new("", "This is a unique translation.", "en"))
        .await;

    assert!(outcome.score > 70.0);
    assert!(outcome.warning.is_none());
}

#[tokio::test]
async fn test_repetition_looping_output() {
    let metric = RepetitionMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new("", "test test test test test test", "en"))
        .await;

    assert!(outcome.score < 50.0);
    assert!(outcome
        .warning
        .unwrap()
        .starts_with(warnings::HIGH_REPETITION));
    assert_eq!(outcome.details["ngram_scores"].as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_repetition_ignores_source() {
    let metric = RepetitionMetric::default();
    let a = metric
        .evaluate(&MetricInput::new("one two one two one two", "uno dos tres", "es"))
        .await;
    let b = metric.evaluate(&MetricInput::new("", "uno dos tres", "es")).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_repetition_empty_target() {
    let metric = RepetitionMetric::default();
    let outcome = metric.evaluate(&MetricInput::new("Hello", "\t", "es")).await;

    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.warning.as_deref(), Some(warnings::EMPTY_TRANSLATION));
}

// Preservation

#[tokio::test]
async fn test_preservation_numbers_kept() {
    let metric = PreservationMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new(
            "The price is $100 and 50 cents.",
            "El precio es $100 y 50 centavos.",
            "es",
        ))
        .await;

    assert_eq!(component(&outcome, "numbers"), 100.0);
}

#[tokio::test]
async fn test_preservation_numbers_lost() {
    let metric = PreservationMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new("The price is $100.", "The price is high.", "en"))
        .await;

    assert!(component(&outcome, "numbers") < 100.0);
    let warning = outcome.warning.unwrap();
    assert!(warning.contains("1 number(s) not preserved"), "{}", warning);
}

#[tokio::test]
async fn test_preservation_component_mean_and_joined_warnings() {
    let metric = PreservationMetric::default();
    let outcome = metric
        .evaluate(&MetricInput::new(
            "Berlin and Paris signed 3 agreements.",
            "dos ciudades firmaron acuerdos",
            "es",
        ))
        .await;

    // numbers 0, punctuation 0, entities 0
    assert_eq!(outcome.score, 0.0);
    let warning = outcome.warning.unwrap();
    assert_eq!(warning.split("; ").count(), 3, "{}", warning);
}

#[tokio::test]
async fn test_preservation_toggles() {
    let metric = PreservationMetric::new(false, false, true);
    let outcome = metric
        .evaluate(&MetricInput::new("Maria met John", "Maria conoció a John", "es"))
        .await;

    assert_eq!(outcome.score, 100.0);
    let components = outcome.details["component_scores"].as_object().unwrap();
    assert_eq!(components.len(), 1);
    assert!(components.contains_key("entities"));
}

// Semantic similarity

#[tokio::test]
async fn test_semantic_identical_vectors() {
    let model = StubEmbeddingModel::new("stub")
        .with_vector("The cat sleeps", vec![0.2, 0.4, 0.4])
        .with_vector("El gato duerme", vec![0.2, 0.4, 0.4]);
    let loader = Arc::new(CountingModelLoader::new(Arc::new(model)));
    let metric = SemanticSimilarityMetric::new("stub", loader.clone());

    let outcome = metric
        .evaluate(&MetricInput::new("The cat sleeps", "El gato duerme", "es"))
        .await;

    assert!((outcome.score - 100.0).abs() < 1e-4);
    assert_eq!(outcome.details["model"], "stub");
    assert!(outcome.warning.is_none());
    assert_eq!(loader.requested_models(), vec!["stub"]);
}

#[tokio::test]
async fn test_semantic_negative_similarity_floors_at_zero() {
    let model = StubEmbeddingModel::new("stub")
        .with_vector("yes", vec![1.0, 0.0])
        .with_vector("no", vec![-1.0, 0.0]);
    let metric = SemanticSimilarityMetric::new(
        "stub",
        Arc::new(CountingModelLoader::new(Arc::new(model))),
    );

    let outcome = metric.evaluate(&MetricInput::new("yes", "no", "en")).await;

    assert_eq!(outcome.score, 0.0);
    assert!((outcome.detail_f64("similarity").unwrap() + 1.0).abs() < 1e-6);
    assert!(outcome.warning.is_none());
}

#[tokio::test]
async fn test_semantic_zero_vector() {
    let model = StubEmbeddingModel::new("stub").with_fallback(vec![0.0, 0.0, 0.0]);
    let metric = SemanticSimilarityMetric::new(
        "stub",
        Arc::new(CountingModelLoader::new(Arc::new(model))),
    );

    let outcome = metric.evaluate(&MetricInput::new("a", "b", "en")).await;
    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.detail_f64("similarity"), Some(0.0));
}

#[tokio::test]
async fn test_semantic_empty_text_skips_loading() {
    let loader = Arc::new(CountingModelLoader::new(Arc::new(StubEmbeddingModel::new("stub"))));
    let metric = SemanticSimilarityMetric::new("stub", loader.clone());

    let outcome = metric.evaluate(&MetricInput::new("", "Hola", "es")).await;

    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.warning.as_deref(), Some(warnings::EMPTY_TEXT));
    assert_eq!(loader.load_count(), 0);
    assert!(!metric.is_loaded());
}

#[tokio::test]
async fn test_semantic_model_is_loaded_once() {
    let loader = Arc::new(CountingModelLoader::new(Arc::new(StubEmbeddingModel::new("stub"))));
    let metric = SemanticSimilarityMetric::new("stub", loader.clone());

    for _ in 0..3 {
        metric.evaluate(&MetricInput::new("Hello", "Hola", "es")).await;
    }

    assert!(metric.is_loaded());
    assert_eq!(loader.load_count(), 1);
}

#[tokio::test]
async fn test_semantic_load_failure_becomes_warning() {
    let loader = Arc::new(FailingModelLoader::new());
    let metric = SemanticSimilarityMetric::new("missing-model", loader.clone());

    let outcome = metric.evaluate(&MetricInput::new("Hello", "Hola", "es")).await;
    assert_eq!(outcome.score, 0.0);
    let warning = outcome.warning.unwrap();
    assert!(warning.starts_with("Similarity calculation error: "), "{}", warning);
    assert!(warning.contains("missing-model"), "{}", warning);

    // A failed load is retried on the next call
    metric.evaluate(&MetricInput::new("Hello", "Hola", "es")).await;
    assert_eq!(loader.attempts(), 2);
    assert!(!metric.is_loaded());
}

#[tokio::test]
async fn test_semantic_encode_failure_becomes_warning() {
    let loader = Arc::new(CountingModelLoader::new(Arc::new(BrokenEmbeddingModel)));
    let metric = SemanticSimilarityMetric::new("broken", loader);

    let outcome = metric.evaluate(&MetricInput::new("Hello", "Hola", "es")).await;
    assert_eq!(outcome.score, 0.0);
    assert!(outcome.warning.unwrap().contains("tensor shape mismatch"));
}

#[tokio::test]
async fn test_semantic_with_builtin_hashing_model() {
    let metric = SemanticSimilarityMetric::new(HASHING_MODEL_ID, Arc::new(DefaultModelLoader::new()));

    let same = metric
        .evaluate(&MetricInput::new("the cat sat on the mat", "the cat sat on the mat", "en"))
        .await;
    let different = metric
        .evaluate(&MetricInput::new("the cat sat on the mat", "quarterly revenue grew", "en"))
        .await;

    assert!(same.score > 99.9);
    assert!(different.score < same.score);
}

#[tokio::test]
async fn test_semantic_unknown_model() {
    let metric = SemanticSimilarityMetric::new("no/such-model", Arc::new(DefaultModelLoader::new()));
    let outcome = metric.evaluate(&MetricInput::new("Hello", "Hola", "es")).await;

    assert_eq!(outcome.score, 0.0);
    assert!(outcome.warning.unwrap().contains("is unavailable"));
}
