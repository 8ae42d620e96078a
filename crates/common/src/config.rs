//! Configuration management for the evaluation engine.
//!
//! Settings are loaded once at startup and handed to the evaluator as an
//! immutable value. Later sources override earlier ones:
//!
//! 1. Compiled defaults
//! 2. `config/default.{toml,yaml,json}` (if it exists)
//! 3. `config/{APP_ENV}` (if it exists, `APP_ENV` defaults to `development`)
//! 4. An explicit configuration file, when one is given
//! 5. Environment variables prefixed with `MTB_`, nested keys separated by `__`
//!
//! ## Example Configuration
//!
//! ```toml
//! [metrics.heuristics.length_ratio]
//! enabled = true
//! weight = 0.15
//! min_ratio = 0.5
//! max_ratio = 2.0
//!
//! [metrics.semantic]
//! enabled = true
//! weight = 0.3
//! model = "char-trigram-hash"
//! ```
//!
//! The same setting from the environment: `MTB_METRICS__SEMANTIC__ENABLED=true`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use translation_benchmark_domain::MetricName;
use validator::{Validate, ValidationError};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "MTB";

/// Embedding model used by the semantic metric unless configured otherwise.
pub const DEFAULT_EMBEDDING_MODEL: &str =
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Metric selection, weights and parameters
    #[validate(nested)]
    pub metrics: MetricsConfig,
    /// Evaluation engine settings
    #[validate(nested)]
    pub engine: EngineConfig,
    /// Logging settings
    pub telemetry: TelemetryConfig,
}

/// Per-category metric configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MetricsConfig {
    /// Surface heuristics
    #[validate(nested)]
    pub heuristics: HeuristicsConfig,
    /// Embedding similarity
    #[validate(nested)]
    pub semantic: SemanticConfig,
}

/// Heuristic metrics, each with its own toggle and weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HeuristicsConfig {
    #[validate(nested)]
    pub language_detection: LanguageDetectionConfig,
    #[validate(nested)]
    pub length_ratio: LengthRatioConfig,
    #[validate(nested)]
    pub repetition: RepetitionConfig,
    #[validate(nested)]
    pub preservation: PreservationConfig,
}

/// Language match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LanguageDetectionConfig {
    /// Run the metric
    pub enabled: bool,
    /// Weight in the fused score
    #[validate(range(min = 0.0))]
    pub weight: f64,
    /// Minimum detector confidence for a full score
    #[validate(range(min = 0.0, max = 1.0))]
    pub confidence_threshold: f64,
}

impl Default for LanguageDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 0.25,
            confidence_threshold: 0.8,
        }
    }
}

/// Length ratio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_ratio_band"))]
pub struct LengthRatioConfig {
    /// Run the metric
    pub enabled: bool,
    /// Weight in the fused score
    #[validate(range(min = 0.0))]
    pub weight: f64,
    /// Lower bound of the accepted target/source ratio
    pub min_ratio: f64,
    /// Upper bound of the accepted target/source ratio
    pub max_ratio: f64,
}

impl Default for LengthRatioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 0.15,
            min_ratio: 0.5,
            max_ratio: 2.0,
        }
    }
}

// The in-band curve divides by (1 - min) and (max - 1).
fn validate_ratio_band(config: &LengthRatioConfig) -> std::result::Result<(), ValidationError> {
    let band_ok = config.min_ratio > 0.0 && config.min_ratio < 1.0 && config.max_ratio > 1.0;
    if band_ok && config.max_ratio.is_finite() {
        return Ok(());
    }

    let mut error = ValidationError::new("ratio_band");
    error.message = Some(
        format!(
            "length ratio band must satisfy 0 < min_ratio < 1 < max_ratio (got {} and {})",
            config.min_ratio, config.max_ratio
        )
        .into(),
    );
    Err(error)
}

/// Repetition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RepetitionConfig {
    /// Run the metric
    pub enabled: bool,
    /// Weight in the fused score
    #[validate(range(min = 0.0))]
    pub weight: f64,
    /// Largest n-gram size inspected
    #[validate(range(min = 2))]
    pub max_ngram_size: usize,
    /// Repetition level above which a warning is raised
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: f64,
}

impl Default for RepetitionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 0.15,
            max_ngram_size: 4,
            threshold: 0.3,
        }
    }
}

/// Content preservation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PreservationConfig {
    /// Run the metric
    pub enabled: bool,
    /// Weight in the fused score
    #[validate(range(min = 0.0))]
    pub weight: f64,
    /// Compare numbers
    pub check_numbers: bool,
    /// Compare punctuation
    pub check_punctuation: bool,
    /// Compare capitalised words
    pub check_entities: bool,
}

impl Default for PreservationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            weight: 0.15,
            check_numbers: true,
            check_punctuation: true,
            check_entities: true,
        }
    }
}

/// Semantic similarity settings. The weight applies to the whole category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SemanticConfig {
    /// Run the metric
    pub enabled: bool,
    /// Weight in the fused score
    #[validate(range(min = 0.0))]
    pub weight: f64,
    /// Embedding model identifier
    #[validate(length(min = 1))]
    pub model: String,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            weight: 0.3,
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl MetricsConfig {
    /// Resolved fusion weight of a metric.
    pub fn weight_for(&self, metric: MetricName) -> f64 {
        let h = &self.heuristics;
        match metric {
            MetricName::LanguageDetection => h.language_detection.weight,
            MetricName::LengthRatio => h.length_ratio.weight,
            MetricName::Repetition => h.repetition.weight,
            MetricName::Preservation => h.preservation.weight,
            MetricName::SemanticSimilarity => self.semantic.weight,
        }
    }

    /// Whether a metric should run at all.
    pub fn is_enabled(&self, metric: MetricName) -> bool {
        let h = &self.heuristics;
        match metric {
            MetricName::LanguageDetection => h.language_detection.enabled,
            MetricName::LengthRatio => h.length_ratio.enabled,
            MetricName::Repetition => h.repetition.enabled,
            MetricName::Preservation => h.preservation.enabled,
            MetricName::SemanticSimilarity => self.semantic.enabled,
        }
    }

    /// Enabled metrics, in evaluation order.
    pub fn enabled_metrics(&self) -> Vec<MetricName> {
        MetricName::ALL
            .into_iter()
            .filter(|m| self.is_enabled(*m))
            .collect()
    }

    /// Configuration with every metric switched off.
    pub fn all_disabled() -> Self {
        let mut config = Self::default();
        config.heuristics.language_detection.enabled = false;
        config.heuristics.length_ratio.enabled = false;
        config.heuristics.repetition.enabled = false;
        config.heuristics.preservation.enabled = false;
        config.semantic.enabled = false;
        config
    }
}

/// Evaluation engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on evaluations running at once in a batch
    #[validate(range(min = 1))]
    pub max_concurrent_evaluations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent_evaluations: 8,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name for tracing
    pub service_name: String,

    /// Enable JSON logging format
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "translation-benchmark".to_string(),
            json_logging: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the standard files and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use translation_benchmark_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("semantic metric enabled: {}", config.metrics.semantic.enabled);
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_with(None, environment())
    }

    /// Like [`AppConfig::load`], with an additional required file on top of
    /// the standard ones.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with(Some(path.as_ref()), environment())
    }

    fn load_with(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            // Start with default configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add environment-specific configuration
            .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(env)
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self)
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}

// Environment variables (prefix: MTB_)
// Example: MTB_METRICS__HEURISTICS__REPETITION__THRESHOLD=0.4
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
