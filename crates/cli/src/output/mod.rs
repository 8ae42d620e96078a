//! Output formatting for CLI

use anyhow::Result;
use serde::{Deserialize, Serialize};

mod formatters;
mod render;
mod table;

pub use formatters::{JsonFormatter, PlainFormatter};
pub use table::TableFormatter;

/// Output format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Table output (default)
    #[default]
    Table,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "table" => Some(Self::Table),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Types that can be printed in every output format.
///
/// JSON and plain output come from the `Serialize` impl; the table layout
/// is specific to each type.
pub trait Formattable: Serialize {
    /// Format as JSON
    fn format_json(&self) -> Result<String> {
        JsonFormatter::format(self)
    }

    /// Format as table
    fn format_table(&self) -> Result<String>;

    /// Format as plain text
    fn format_plain(&self) -> Result<String> {
        PlainFormatter::format(self)
    }

    /// Format using the specified format
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Table => self.format_table(),
            OutputFormat::Plain => self.format_plain(),
        }
    }
}

/// Color helpers
pub mod colors {
    use colored::*;
    use translation_benchmark_domain::QualityTier;

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    pub fn bold(s: &str) -> ColoredString {
        s.bold()
    }

    /// Color a score by its quality tier.
    pub fn score(score: f64) -> ColoredString {
        let text = format!("{:.1}", score);
        match QualityTier::from_score(score) {
            QualityTier::Excellent => text.green().bold(),
            QualityTier::Good => text.green(),
            QualityTier::Fair => text.yellow(),
            QualityTier::Poor => text.red(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::parse("plain"), Some(OutputFormat::Plain));
        assert_eq!(OutputFormat::parse("invalid"), None);
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Plain.to_string(), "plain");
    }

    #[test]
    fn test_output_format_serialization() {
        let serialized = serde_json::to_string(&OutputFormat::Json).unwrap();
        assert_eq!(serialized, "\"json\"");

        let deserialized: OutputFormat = serde_json::from_str("\"table\"").unwrap();
        assert_eq!(deserialized, OutputFormat::Table);
    }
}
