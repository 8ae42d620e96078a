//! Flat metric rows as kept by the result store.
//!
//! An evaluation is persisted as one row per kept metric plus an
//! `overall_score` pseudo-row whose details carry the explanation and the
//! warnings. Weights are not persisted; reconstructed metrics carry weight 0.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{DomainError, DomainResult};
use crate::evaluation::{EvaluationResult, ScoreBreakdown};
use crate::identifiers::TranslationId;
use crate::metric::{MetricDetails, MetricResult};

/// Name of the pseudo-metric row holding the fused score.
pub const OVERALL_SCORE_METRIC: &str = "overall_score";

const EXPLANATION_KEY: &str = "explanation";
const WARNINGS_KEY: &str = "warnings";

/// One persisted metric row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Metric identifier, or [`OVERALL_SCORE_METRIC`]
    pub metric_name: String,
    /// Metric score
    pub metric_value: f64,
    /// Detail payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl EvaluationResult {
    /// Decompose into rows: kept metrics first, then the overall pseudo-row.
    pub fn to_records(&self) -> Vec<MetricRecord> {
        let breakdown = &self.score_breakdown;

        let mut records: Vec<MetricRecord> = breakdown
            .metrics
            .iter()
            .map(|metric| MetricRecord {
                metric_name: metric.name.clone(),
                metric_value: metric.value,
                details: Some(json!(metric.details)),
            })
            .collect();

        records.push(MetricRecord {
            metric_name: OVERALL_SCORE_METRIC.to_string(),
            metric_value: breakdown.overall_score,
            details: Some(json!({
                EXPLANATION_KEY: breakdown.explanation,
                WARNINGS_KEY: breakdown.warnings,
            })),
        });

        records
    }

    /// Rebuild an evaluation from persisted rows.
    pub fn from_records(
        translation_id: TranslationId,
        provider_name: impl Into<String>,
        model_id: impl Into<String>,
        records: impl IntoIterator<Item = MetricRecord>,
    ) -> DomainResult<Self> {
        let mut metrics = Vec::new();
        let mut overall: Option<(f64, String, Vec<String>)> = None;

        for record in records {
            if record.metric_name == OVERALL_SCORE_METRIC {
                if overall.is_some() {
                    return Err(DomainError::InvalidRecord(format!(
                        "duplicate {} row",
                        OVERALL_SCORE_METRIC
                    )));
                }
                let (explanation, warnings) = parse_overall_details(record.details.as_ref())?;
                overall = Some((record.metric_value, explanation, warnings));
            } else {
                metrics.push(MetricResult {
                    name: record.metric_name,
                    value: record.metric_value,
                    weight: 0.0,
                    details: parse_metric_details(record.details)?,
                });
            }
        }

        let (overall_score, explanation, warnings) =
            overall.unwrap_or((0.0, String::new(), Vec::new()));

        Ok(Self {
            translation_id,
            provider_name: provider_name.into(),
            model_id: model_id.into(),
            score_breakdown: ScoreBreakdown {
                overall_score,
                metrics,
                warnings,
                explanation,
            },
        })
    }
}

fn parse_overall_details(details: Option<&Value>) -> DomainResult<(String, Vec<String>)> {
    let Some(details) = details else {
        return Ok((String::new(), Vec::new()));
    };

    let explanation = match details.get(EXPLANATION_KEY) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(DomainError::InvalidRecord(format!(
                "explanation must be a string, got {}",
                other
            )))
        }
    };

    let warnings = match details.get(WARNINGS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<String>>(value.clone()).map_err(|e| {
            DomainError::InvalidRecord(format!("warnings must be a list of strings: {}", e))
        })?,
    };

    Ok((explanation, warnings))
}

fn parse_metric_details(details: Option<Value>) -> DomainResult<MetricDetails> {
    match details {
        None | Some(Value::Null) => Ok(MetricDetails::new()),
        Some(Value::Object(map)) => Ok(map.into_iter().collect()),
        Some(other) => Err(DomainError::InvalidRecord(format!(
            "metric details must be an object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, value: f64, details: Option<Value>) -> MetricRecord {
        MetricRecord {
            metric_name: name.to_string(),
            metric_value: value,
            details,
        }
    }

    #[test]
    fn test_missing_overall_row_defaults() {
        let result = EvaluationResult::from_records(
            TranslationId::from(1_i64),
            "openai",
            "gpt-4",
            vec![record("length_ratio", 88.0, None)],
        )
        .unwrap();

        assert_eq!(result.overall_score(), 0.0);
        assert!(result.score_breakdown.explanation.is_empty());
        assert!(result.score_breakdown.warnings.is_empty());
        assert_eq!(result.score_breakdown.metrics.len(), 1);
        assert_eq!(result.score_breakdown.metrics[0].weight, 0.0);
    }

    #[test]
    fn test_duplicate_overall_row_is_rejected() {
        let rows = vec![
            record(OVERALL_SCORE_METRIC, 50.0, None),
            record(OVERALL_SCORE_METRIC, 60.0, None),
        ];
        let err = EvaluationResult::from_records(TranslationId::from(1_i64), "p", "m", rows)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidRecord(_)));
    }

    #[test]
    fn test_malformed_warnings_are_rejected() {
        let rows = vec![record(
            OVERALL_SCORE_METRIC,
            50.0,
            Some(json!({"explanation": "x", "warnings": [1, 2]})),
        )];
        assert!(EvaluationResult::from_records(TranslationId::from(1_i64), "p", "m", rows).is_err());
    }

    #[test]
    fn test_scalar_metric_details_are_rejected() {
        let rows = vec![record("repetition", 50.0, Some(json!(3)))];
        assert!(EvaluationResult::from_records(TranslationId::from(1_i64), "p", "m", rows).is_err());
    }
}
