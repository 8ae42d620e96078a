//! Comparison run files.
//!
//! A run file holds one source text and the outputs several providers
//! produced for it:
//!
//! ```json
//! {
//!   "source_text": "Good morning",
//!   "target_lang": "es",
//!   "candidates": [
//!     {"provider": "deepl", "model": "default", "output_text": "Buenos días", "latency_ms": 120},
//!     {"provider": "openai", "model": "gpt-4", "error": "rate limited"}
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use translation_benchmark_application::{EvaluationRequest, Evaluator};
use translation_benchmark_domain::{EvaluationResult, RunSummary, TranslationId};

/// One provider's attempt at the translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Provider output; absent when the call failed
    #[serde(default)]
    pub output_text: Option<String>,
    /// Provider error, if the call failed
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

fn default_model() -> String {
    "default".to_string()
}

impl Candidate {
    /// Output text of a successful call.
    pub fn output(&self) -> Option<&str> {
        match (&self.error, &self.output_text) {
            (None, Some(text)) => Some(text),
            _ => None,
        }
    }
}

/// Input of `mt-bench compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub source_text: String,
    pub target_lang: String,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub reference_translation: Option<String>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl ComparisonRun {
    /// Parse a run from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid comparison run file")
    }

    /// Read and parse a run file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read run file {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("In {}", path.display()))
    }

    fn request(&self, candidate: &Candidate, output: &str) -> EvaluationRequest {
        let mut request = EvaluationRequest::new(
            TranslationId::generate(),
            candidate.provider.clone(),
            candidate.model.clone(),
            self.source_text.clone(),
            output,
            self.target_lang.clone(),
        );
        request.source_lang = self.source_lang.clone();
        request.reference_translation = self.reference_translation.clone();
        request
    }
}

/// Evaluation of one candidate in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub evaluation: EvaluationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Output of `mt-bench compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub generated_at: DateTime<Utc>,
    pub target_lang: String,
    pub summary: RunSummary,
    /// Per-candidate results, in run file order
    pub results: Vec<CandidateResult>,
}

/// Evaluate every candidate of a run and rank them.
///
/// Failed candidates get an all-zero result and rank last.
pub async fn run_comparison(evaluator: &Evaluator, run: &ComparisonRun) -> ComparisonReport {
    let mut slots: Vec<Option<EvaluationResult>> = Vec::with_capacity(run.candidates.len());
    let mut requests = Vec::new();

    for candidate in &run.candidates {
        match candidate.output() {
            Some(output) => {
                requests.push(run.request(candidate, output));
                slots.push(None);
            }
            None => {
                debug!(provider = %candidate.provider, "Candidate failed upstream");
                slots.push(Some(EvaluationResult::translation_failed(
                    TranslationId::generate(),
                    candidate.provider.clone(),
                    candidate.model.clone(),
                    candidate.error.as_deref(),
                )));
            }
        }
    }

    info!(
        candidates = run.candidates.len(),
        evaluated = requests.len(),
        "Running comparison"
    );

    let mut evaluated = evaluator.evaluate_batch(requests).await.into_iter();
    let results: Vec<CandidateResult> = slots
        .into_iter()
        .zip(&run.candidates)
        .filter_map(|(slot, candidate)| {
            let evaluation = slot.or_else(|| evaluated.next())?;
            Some(CandidateResult {
                evaluation,
                latency_ms: candidate.latency_ms,
            })
        })
        .collect();

    let summary = RunSummary::rank(results.iter().map(|r| (&r.evaluation, r.latency_ms)));

    ComparisonReport {
        generated_at: Utc::now(),
        target_lang: run.target_lang.clone(),
        summary,
        results,
    }
}
