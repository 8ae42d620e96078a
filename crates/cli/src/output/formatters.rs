//! Output formatters

use anyhow::Result;
use serde::Serialize;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Plain text formatter
pub struct PlainFormatter;

impl PlainFormatter {
    /// Format a value as indented `key: value` lines
    pub fn format<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let json = serde_json::to_value(value)?;
        Ok(Self::format_value(&json, 0).trim_start_matches('\n').to_string())
    }

    fn format_value(value: &serde_json::Value, indent: usize) -> String {
        let indent_str = "  ".repeat(indent);
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            serde_json::Value::Array(arr) => {
                let items: Vec<String> = arr
                    .iter()
                    .map(|v| format!("\n{}- {}", indent_str, Self::format_value(v, indent + 1).trim_start()))
                    .collect();
                items.concat()
            }
            serde_json::Value::Object(obj) => {
                let items: Vec<String> = obj
                    .iter()
                    .map(|(k, v)| {
                        let nested = matches!(v, serde_json::Value::Object(_));
                        let rendered = Self::format_value(v, indent + 1);
                        if nested {
                            format!("\n{}{}:{}", indent_str, k, rendered)
                        } else {
                            format!("\n{}{}: {}", indent_str, k, rendered)
                        }
                    })
                    .collect();
                items.concat()
            }
        }
    }
}
