//! `mt-bench compare`: rank several provider outputs for one source text.

use anyhow::{Context, Result};
use std::path::Path;
use translation_benchmark_domain::language::is_supported;

use crate::commands::CommandContext;
use crate::run_file::{run_comparison, ComparisonReport, ComparisonRun};

/// Evaluate a run file and print the ranking
pub async fn compare(ctx: &CommandContext, input: &Path) -> Result<()> {
    let run = ComparisonRun::load(input)?;
    let report = run_report(ctx, &run).await?;
    ctx.print(&report)
}

/// Evaluate a parsed run
pub async fn run_report(ctx: &CommandContext, run: &ComparisonRun) -> Result<ComparisonReport> {
    if !is_supported(&run.target_lang) {
        anyhow::bail!("Unsupported target language '{}' in run file", run.target_lang);
    }

    let evaluator = ctx.evaluator().context("Cannot run comparison")?;
    Ok(run_comparison(&evaluator, run).await)
}
