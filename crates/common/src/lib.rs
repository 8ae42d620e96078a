//! Shared configuration and telemetry for the translation benchmark engine.
//!
//! This crate provides:
//! - Configuration management (metric selection, weights, engine limits)
//! - Telemetry and structured logging

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{
    AppConfig, EngineConfig, HeuristicsConfig, LanguageDetectionConfig, LengthRatioConfig,
    MetricsConfig, PreservationConfig, RepetitionConfig, SemanticConfig, TelemetryConfig,
    DEFAULT_EMBEDDING_MODEL,
};
pub use telemetry::{init_from_config, init_tracing};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
