//! Structured logging setup.
//!
//! Integrates with the tracing-subscriber ecosystem: an `EnvFilter` built
//! from the configured level, plus either a JSON or a pretty formatting
//! layer.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Log level or filter directive (e.g. "info", "kite=debug").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include span events (enter, exit, close).
    pub span_events: bool,

    /// Whether to include target (module path).
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            include_target: true,
        }
    }
}

/// Initializes the logging subsystem.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter is invalid or a
/// global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Standard log fields for Kite.
///
/// Use these field names for consistency across logs.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http.method";

    /// HTTP path field name.
    pub const HTTP_PATH: &str = "http.path";

    /// HTTP status code field name.
    pub const HTTP_STATUS: &str = "http.status_code";

    /// Middleware stage field name.
    pub const STAGE: &str = "stage";

    /// Error field name.
    pub const ERROR: &str = "error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.span_events);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(fields::HTTP_METHOD, "http.method");
        assert_eq!(fields::HTTP_PATH, "http.path");
        assert_eq!(fields::HTTP_STATUS, "http.status_code");
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };

        // Should return Ok even when disabled
        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LogConfig {
            level: "foo=bar=baz".to_string(),
            ..Default::default()
        };

        assert!(init_logging(&config).is_err());
    }
}
