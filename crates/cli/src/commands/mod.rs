//! CLI commands

pub mod compare;
pub mod config;
pub mod evaluate;

use anyhow::{Context, Result};
use translation_benchmark_application::Evaluator;
use translation_benchmark_common::AppConfig;

use crate::output::{Formattable, OutputFormat};

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: AppConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Build an evaluator from the loaded configuration
    pub fn evaluator(&self) -> Result<Evaluator> {
        Evaluator::new(&self.config).context("Failed to build evaluator")
    }

    /// Print a value in the selected output format
    pub fn print<T: Formattable>(&self, value: &T) -> Result<()> {
        println!("{}", value.format(self.format)?);
        Ok(())
    }
}
