//! Surface content preservation: numbers, punctuation and capitalised words.

use async_trait::async_trait;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, instrument};
use translation_benchmark_domain::metric::warnings;
use translation_benchmark_domain::{MetricName, MetricOutcome};

use super::{Metric, MetricInput};

// Integers and decimals, optionally followed by a percent sign.
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+(?:[.,]\d+)?%?\b").expect("number pattern is valid"));

const PUNCTUATION_WARN_BELOW: f64 = 80.0;
const ENTITY_WARN_BELOW: f64 = 80.0;

/// Checks that content which should survive translation verbatim does.
///
/// Capitalised words stand in for named entities; this is a coarse
/// heuristic, not entity recognition.
#[derive(Debug, Clone)]
pub struct PreservationMetric {
    check_numbers: bool,
    check_punctuation: bool,
    check_entities: bool,
}

impl PreservationMetric {
    /// Create the metric with the given sub-checks switched on.
    pub fn new(check_numbers: bool, check_punctuation: bool, check_entities: bool) -> Self {
        Self {
            check_numbers,
            check_punctuation,
            check_entities,
        }
    }

    fn extract_numbers(text: &str) -> Vec<&str> {
        NUMBER_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
    }

    fn extract_punctuation(text: &str) -> Vec<char> {
        text.chars().filter(char::is_ascii_punctuation).collect()
    }

    fn extract_capitalized(text: &str) -> Vec<&str> {
        text.split_whitespace()
            .filter(|word| word.chars().next().is_some_and(char::is_uppercase))
            .collect()
    }

    /// Share of distinct source items found in the target, 100 when the
    /// source has none.
    fn preserved_share(source: &[&str], target: &[&str]) -> (f64, usize) {
        let source_set: HashSet<&str> = source.iter().copied().collect();
        if source_set.is_empty() {
            return (100.0, 0);
        }
        let target_set: HashSet<&str> = target.iter().copied().collect();
        let preserved = source_set.intersection(&target_set).count();
        (preserved as f64 / source_set.len() as f64 * 100.0, preserved)
    }

    fn punctuation_score(source: &[char], target: &[char]) -> f64 {
        if source.is_empty() {
            return 100.0;
        }
        let matches = source.iter().filter(|c| target.contains(c)).count();
        matches as f64 / source.len() as f64 * 100.0
    }
}

impl Default for PreservationMetric {
    fn default() -> Self {
        Self::new(true, true, true)
    }
}

#[async_trait]
impl Metric for PreservationMetric {
    #[instrument(skip(self, input), fields(metric = "preservation"))]
    async fn evaluate(&self, input: &MetricInput<'_>) -> MetricOutcome {
        if input.target_text.trim().is_empty() {
            return MetricOutcome::degenerate(warnings::EMPTY_TRANSLATION);
        }

        let mut scores: IndexMap<&'static str, f64> = IndexMap::new();
        let mut issues: Vec<String> = Vec::new();

        if self.check_numbers {
            let source = Self::extract_numbers(input.source_text);
            let target = Self::extract_numbers(input.target_text);
            let (score, preserved) = Self::preserved_share(&source, &target);
            scores.insert("numbers", score);

            if score < 100.0 {
                // Repeated source numbers each count as missing.
                let missing = source.len().saturating_sub(preserved);
                issues.push(format!(
                    "{}: {} number(s) not preserved",
                    warnings::CONTENT_LOSS,
                    missing
                ));
            }
        }

        if self.check_punctuation {
            let source = Self::extract_punctuation(input.source_text);
            let target = Self::extract_punctuation(input.target_text);
            let score = Self::punctuation_score(&source, &target);
            scores.insert("punctuation", score);

            if score < PUNCTUATION_WARN_BELOW {
                issues.push(format!("{}: punctuation pattern differs", warnings::FORMAT_DRIFT));
            }
        }

        if self.check_entities {
            let source = Self::extract_capitalized(input.source_text);
            let target = Self::extract_capitalized(input.target_text);
            let (score, _) = Self::preserved_share(&source, &target);
            scores.insert("entities", score);

            if score < ENTITY_WARN_BELOW {
                issues.push(format!(
                    "{}: some capitalized words not preserved",
                    warnings::CONTENT_LOSS
                ));
            }
        }

        let overall = if scores.is_empty() {
            100.0
        } else {
            scores.values().sum::<f64>() / scores.len() as f64
        };

        debug!(components = ?scores, overall = overall, "Preservation scores");

        let warning = (!issues.is_empty()).then(|| issues.join("; "));

        MetricOutcome::new(overall)
            .with_optional_warning(warning)
            .with_detail("component_scores", &scores)
    }

    fn name(&self) -> MetricName {
        MetricName::Preservation
    }
}
