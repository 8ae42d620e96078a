//! `mt-bench config`: inspect the resolved configuration.

use anyhow::Result;

use crate::commands::CommandContext;

/// Print the configuration after all sources were merged
pub fn show(ctx: &CommandContext) -> Result<()> {
    ctx.print(&ctx.config)
}
