//! Target language verification.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{
    DetectionError, LanguageDetector, LanguageProbability, MetricName, MetricOutcome,
};

use super::{Metric, MetricInput};

/// Score whether the translation is written in the requested language.
pub struct LanguageMatchMetric {
    detector: Arc<dyn LanguageDetector>,
    confidence_threshold: f64,
}

impl LanguageMatchMetric {
    /// Create the metric around a detector.
    pub fn new(detector: Arc<dyn LanguageDetector>, confidence_threshold: f64) -> Self {
        Self {
            detector,
            confidence_threshold,
        }
    }

    fn score(&self, candidates: &[LanguageProbability], target_lang: &str) -> MetricOutcome {
        let Some(top) = candidates.first() else {
            return MetricOutcome::degenerate(warnings::UNDETECTED_LANGUAGE)
                .with_detail("detected_lang", None::<String>)
                .with_detail("confidence", 0.0)
                .with_detail("matches_target", false);
        };

        let matches_target = top.lang == target_lang;
        let confident = top.prob >= self.confidence_threshold;

        let score = match (matches_target, confident) {
            (true, true) => 100.0,
            (true, false) => top.prob * 100.0,
            (false, _) => 0.0,
        };

        let warning = if !matches_target {
            Some(format!(
                "Language mismatch: expected '{}', detected '{}'",
                target_lang, top.lang
            ))
        } else if !confident {
            Some(warnings::LOW_CONFIDENCE.to_string())
        } else {
            None
        };

        debug!(
            detected = %top.lang,
            confidence = top.prob,
            target = target_lang,
            score = score,
            "Language detection"
        );

        MetricOutcome::new(score)
            .with_optional_warning(warning)
            .with_detail("detected_lang", &top.lang)
            .with_detail("confidence", top.prob)
            .with_detail("matches_target", matches_target)
            .with_detail("all_probabilities", candidates)
    }

    fn detection_failed(error: &DetectionError) -> MetricOutcome {
        warn!(error = %error, "Language detection failed");
        MetricOutcome::new(50.0)
            .with_warning(format!("Language detection error: {}", error))
            .with_detail("detected_lang", None::<String>)
            .with_detail("confidence", 0.0)
            .with_detail("matches_target", None::<bool>)
    }
}

#[async_trait]
impl Metric for LanguageMatchMetric {
    #[instrument(skip(self, input), fields(metric = "language_detection"))]
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome {
        if input.target_text.trim().is_empty() {
            return MetricOutcome::degenerate(warnings::EMPTY_TRANSLATION)
                .with_detail("detected_lang", None::<String>)
                .with_detail("confidence", 0.0)
                .with_detail("matches_target", false);
        }

        match self.detector.detect(input.target_text) {
            Ok(candidates) => self.score(&candidates, input.target_lang),
            Err(error) => Self::detection_failed(&error),
        }
    }

    fn name(&self) -> MetricName {
        MetricName::LanguageDetection
    }
}

/// Language detector backed by `whatlang` trigram models.
///
/// `whatlang` only reports its best guess, so the candidate list holds at
/// most one entry. Text without any script (digits, percentages, codes) is
/// reported as a detection failure, which the metric scores as neutral.
///
/// Its confidence is not a calibrated probability: short sentences often
/// come back well under `0.8` even when the language is right, so a
/// threshold tuned for probabilistic detectors marks them low-confidence and
/// scales their score down. Lower `confidence_threshold` when scoring short
/// segments with this backend.
pub struct WhatlangDetector {
    detector: whatlang::Detector,
}

impl WhatlangDetector {
    /// Detector over every language `whatlang` knows.
    pub fn new() -> Self {
        Self {
            detector: whatlang::Detector::new(),
        }
    }
}

impl Default for WhatlangDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<Vec<LanguageProbability>, DetectionError> {
        let info = self
            .detector
            .detect(text)
            .ok_or_else(|| DetectionError::Failed("no features in text".to_string()))?;

        Ok(vec![LanguageProbability::new(
            to_iso_639_1(info.lang().code()),
            info.confidence(),
        )])
    }
}

/// Map an ISO 639-3 code to ISO 639-1 where a mapping is known.
fn to_iso_639_1(code: &str) -> &str {
    match code {
        "eng" => "en",
        "spa" => "es",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "por" => "pt",
        "cmn" => "zh",
        "jpn" => "ja",
        "kor" => "ko",
        "rus" => "ru",
        "ara" | "arb" => "ar",
        "hin" => "hi",
        "nld" => "nl",
        "pol" => "pl",
        "tur" => "tr",
        "ukr" => "uk",
        "swe" => "sv",
        "dan" => "da",
        "fin" => "fi",
        "ces" => "cs",
        "ell" => "el",
        "heb" => "he",
        "vie" => "vi",
        "tha" => "th",
        "ind" => "id",
        "ben" => "bn",
        "pes" => "fa",
        "ron" => "ro",
        "hun" => "hu",
        "bul" => "bg",
        other => other,
    }
}
