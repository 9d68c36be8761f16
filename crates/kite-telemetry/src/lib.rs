//! Structured logging for Kite services.
//!
//! The application core emits diagnostics through `tracing`; this crate
//! owns the subscriber setup a host calls once at startup. JSON output is
//! the default so production logs stay machine-readable; the development
//! preset switches to a human-readable format.
//!
//! # Example
//!
//! ```rust,ignore
//! use kite_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//!
//! tracing::info!(http.method = "GET", http.path = "/", "request received");
//! ```

#![doc(html_root_url = "https://docs.rs/kite-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
