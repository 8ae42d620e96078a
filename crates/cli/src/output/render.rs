//! Table layouts for evaluation results, comparison reports and settings.

use anyhow::Result;
use std::fmt::Write;
use translation_benchmark_common::AppConfig;
use translation_benchmark_domain::{title_case, EvaluationResult, MetricName, QualityTier};

use super::{colors, Formattable, TableFormatter};
use crate::run_file::ComparisonReport;

fn metric_rows(result: &EvaluationResult) -> Vec<Vec<String>> {
    result
        .score_breakdown
        .metrics
        .iter()
        .map(|m| {
            vec![
                title_case(&m.name),
                format!("{:.1}", m.value),
                format!("{:.2}", m.weight),
                format!("{:.2}", m.contribution()),
            ]
        })
        .collect()
}

impl Formattable for EvaluationResult {
    fn format_table(&self) -> Result<String> {
        let breakdown = &self.score_breakdown;
        let mut out = String::new();

        writeln!(
            out,
            "{} {}/{} {}",
            colors::bold("Translation"),
            self.provider_name,
            self.model_id,
            colors::dim(&format!("({})", self.translation_id))
        )?;
        writeln!(
            out,
            "Overall: {} ({})",
            colors::score(breakdown.overall_score),
            breakdown.tier()
        )?;

        if !breakdown.metrics.is_empty() {
            let table = TableFormatter::simple(
                vec!["Metric", "Score", "Weight", "Contribution"],
                metric_rows(self),
            );
            writeln!(out, "{}", table)?;
        }

        if !breakdown.warnings.is_empty() {
            writeln!(out, "{}", colors::bold("Warnings:"))?;
            for warning in &breakdown.warnings {
                writeln!(out, "  {} {}", colors::warning("!"), warning)?;
            }
        }

        write!(out, "{}", colors::dim(&breakdown.explanation))?;
        Ok(out)
    }
}

impl Formattable for ComparisonReport {
    fn format_table(&self) -> Result<String> {
        let summary = &self.summary;
        let mut out = String::new();

        writeln!(
            out,
            "{} ({} providers, target language '{}')",
            colors::bold("Comparison"),
            summary.total_providers,
            self.target_lang
        )?;

        if summary.is_empty() {
            write!(out, "{}", colors::warning("No candidates in run file."))?;
            return Ok(out);
        }

        let rows: Vec<Vec<String>> = summary
            .rankings
            .iter()
            .map(|r| {
                vec![
                    format!("#{}", r.rank),
                    r.provider.clone(),
                    r.model.clone(),
                    format!("{:.1}", r.score),
                    QualityTier::from_score(r.score).to_string(),
                    r.latency_ms
                        .map(|ms| format!("{} ms", ms))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        writeln!(
            out,
            "{}",
            TableFormatter::simple(
                vec!["Rank", "Provider", "Model", "Score", "Tier", "Latency"],
                rows
            )
        )?;

        if let (Some(provider), Some(score)) = (&summary.best_provider, summary.best_score) {
            writeln!(
                out,
                "Best: {} ({})",
                colors::success(provider),
                colors::score(score)
            )?;
        }

        for result in &self.results {
            writeln!(out)?;
            writeln!(out, "{}", result.evaluation.format_table()?)?;
        }

        Ok(out.trim_end().to_string())
    }
}

fn metric_parameters(config: &AppConfig, metric: MetricName) -> String {
    let h = &config.metrics.heuristics;
    match metric {
        MetricName::LanguageDetection => format!(
            "confidence_threshold={}",
            h.language_detection.confidence_threshold
        ),
        MetricName::LengthRatio => format!(
            "min_ratio={}, max_ratio={}",
            h.length_ratio.min_ratio, h.length_ratio.max_ratio
        ),
        MetricName::Repetition => format!(
            "max_ngram_size={}, threshold={}",
            h.repetition.max_ngram_size, h.repetition.threshold
        ),
        MetricName::Preservation => format!(
            "numbers={}, punctuation={}, entities={}",
            h.preservation.check_numbers,
            h.preservation.check_punctuation,
            h.preservation.check_entities
        ),
        MetricName::SemanticSimilarity => format!("model={}", config.metrics.semantic.model),
    }
}

impl Formattable for AppConfig {
    fn format_table(&self) -> Result<String> {
        let rows: Vec<Vec<String>> = MetricName::ALL
            .into_iter()
            .map(|metric| {
                vec![
                    metric.as_str().to_string(),
                    if self.metrics.is_enabled(metric) { "yes" } else { "no" }.to_string(),
                    format!("{}", self.metrics.weight_for(metric)),
                    metric.weight_path(),
                    metric_parameters(self, metric),
                ]
            })
            .collect();

        let mut out = String::new();
        writeln!(out, "{}", colors::bold("Metrics"))?;
        writeln!(
            out,
            "{}",
            TableFormatter::simple(
                vec!["Metric", "Enabled", "Weight", "Weight key", "Parameters"],
                rows
            )
        )?;
        writeln!(out, "{}", colors::bold("Engine and telemetry"))?;
        write!(
            out,
            "{}",
            TableFormatter::key_value(vec![
                (
                    "max_concurrent_evaluations",
                    self.engine.max_concurrent_evaluations.to_string()
                ),
                ("service_name", self.telemetry.service_name.clone()),
                ("json_logging", self.telemetry.json_logging.to_string()),
                ("log_level", self.telemetry.log_level.clone()),
            ])
        )?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use crate::run_file::CandidateResult;
    use translation_benchmark_domain::RunSummary;
    use translation_benchmark_testing::builders::EvaluationResultBuilder;
    use translation_benchmark_testing::fixtures::create_test_evaluation_result;

    fn result() -> EvaluationResult {
        EvaluationResultBuilder::new()
            .with_provider("deepl", "default")
            .with_overall_score(82.5)
            .with_metric(MetricName::LengthRatio, 90.0, 0.15)
            .with_warning("preservation: Potential content loss detected: 1 number(s) not preserved")
            .with_explanation("Good translation quality (score: 82.5/100). Top factors: Length Ratio.")
            .build()
    }

    #[test]
    fn test_evaluation_table() {
        colored::control::set_override(false);
        let output = result().format(OutputFormat::Table).unwrap();

        assert!(output.contains("deepl/default"));
        assert!(output.contains("Overall: 82.5 (Good)"));
        assert!(output.contains("Length Ratio"));
        assert!(output.contains("! preservation: Potential content loss"));
        assert!(output.ends_with("Top factors: Length Ratio."));
    }

    #[test]
    fn test_evaluation_json_round_trips() {
        let result = result();
        let json = result.format(OutputFormat::Json).unwrap();
        let back: EvaluationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_config_table_lists_every_metric() {
        colored::control::set_override(false);
        let output = AppConfig::default().format(OutputFormat::Table).unwrap();

        for metric in MetricName::ALL {
            assert!(output.contains(metric.as_str()), "missing {}", metric);
        }
        assert!(output.contains("min_ratio=0.5, max_ratio=2"));
        assert!(output.contains("metrics.heuristics.length_ratio.weight"));
        assert!(output.contains("metrics.semantic.weight"));
    }

    #[test]
    fn test_comparison_table_ranks_providers() {
        colored::control::set_override(false);
        let evaluations = vec![
            create_test_evaluation_result("google", 64.0),
            create_test_evaluation_result("deepl", 88.0),
        ];
        let summary = RunSummary::rank(evaluations.iter().map(|e| (e, None)));
        let report = ComparisonReport {
            generated_at: chrono::Utc::now(),
            target_lang: "es".to_string(),
            summary,
            results: evaluations
                .into_iter()
                .map(|evaluation| CandidateResult {
                    evaluation,
                    latency_ms: None,
                })
                .collect(),
        };

        let output = report.format(OutputFormat::Table).unwrap();

        assert!(output.starts_with("Comparison (2 providers, target language 'es')"));
        assert!(output.contains("Best: deepl (88.0)"));
        let deepl = output.find("#1").unwrap();
        let google = output.find("#2").unwrap();
        assert!(deepl < google);
    }
}
