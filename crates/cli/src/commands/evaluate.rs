//! `mt-bench evaluate`: score one source/target pair.

use anyhow::{Context, Result};
use translation_benchmark_application::EvaluationRequest;
use translation_benchmark_domain::{EvaluationResult, TranslationId};

use crate::commands::CommandContext;

/// Arguments of the evaluate command
#[derive(Debug, Clone)]
pub struct EvaluateArgs {
    pub source: String,
    pub target: String,
    pub target_lang: String,
    pub source_lang: Option<String>,
    pub provider: String,
    pub model: String,
    pub translation_id: Option<String>,
}

impl EvaluateArgs {
    /// Turn the arguments into a request, rejecting unsupported languages.
    pub fn into_request(self) -> Result<EvaluationRequest> {
        let translation_id = self
            .translation_id
            .map(TranslationId::from)
            .unwrap_or_else(TranslationId::generate);

        let mut request = EvaluationRequest::new(
            translation_id,
            self.provider,
            self.model,
            self.source,
            self.target,
            self.target_lang,
        );
        request.source_lang = self.source_lang;

        request
            .ensure_supported_language()
            .context("Cannot evaluate translation")?;
        Ok(request)
    }
}

/// Evaluate one translation and print the result
pub async fn evaluate(ctx: &CommandContext, args: EvaluateArgs) -> Result<()> {
    let result = run(ctx, args).await?;
    ctx.print(&result)
}

/// Evaluate one translation
pub async fn run(ctx: &CommandContext, args: EvaluateArgs) -> Result<EvaluationResult> {
    let request = args.into_request()?;
    let evaluator = ctx.evaluator()?;
    Ok(evaluator.evaluate(&request).await)
}
