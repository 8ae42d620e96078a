//! Translation benchmark CLI library
//!
//! This library provides the pieces behind the `mt-bench` binary: the
//! comparison run file format, the command implementations and output
//! formatting.

pub mod commands;
pub mod output;
pub mod run_file;

pub use commands::CommandContext;
pub use output::{Formattable, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};
pub use run_file::{Candidate, ComparisonReport, ComparisonRun};

/// Re-export common types
pub use anyhow::{Context, Result};
