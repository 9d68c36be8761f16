//! Error types for Kite.
//!
//! [`KiteError`] is the only error surface of the application core. Two
//! conditions that look like errors are deliberately absent from it: an
//! unmatched route is recovered into the fixed 404 response, and a response
//! left unpopulated is recovered into the fixed 500 representation at render
//! time. Neither ever fails a dispatch call.

use thiserror::Error;

/// Result type alias using [`KiteError`].
pub type KiteResult<T> = Result<T, KiteError>;

/// Standard error type for the Kite application core.
///
/// # Example
///
/// ```
/// use kite_core::KiteError;
///
/// let err = KiteError::malformed("missing request method");
/// assert_eq!(err.to_string(), "malformed request: missing request method");
/// ```
#[derive(Error, Debug)]
pub enum KiteError {
    /// The host-provided message is missing required method or path
    /// information. The dispatch call fails immediately; no partial
    /// response is produced.
    #[error("malformed request: {message}")]
    MalformedRequest {
        /// Human-readable description of what was missing.
        message: String,
    },

    /// The declared-length body read failed or came up short. The bounded
    /// read must complete before dispatch proceeds, so this fails the call.
    #[error("failed to read request body ({declared} bytes declared): {source}")]
    BodyRead {
        /// The content length the transport declared.
        declared: u64,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A middleware stage failed during either phase. The pipeline does not
    /// catch this and partially applied stages are not rolled back; the host
    /// must treat it as fatal for the request.
    #[error(transparent)]
    Middleware(#[from] MiddlewareError),
}

impl KiteError {
    /// Creates a malformed-request error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    /// Creates a body-read error.
    #[must_use]
    pub fn body_read(declared: u64, source: std::io::Error) -> Self {
        Self::BodyRead { declared, source }
    }
}

/// A failure raised by a middleware stage.
///
/// Carries the failing stage's name so the host can attribute the
/// fatal-for-this-request condition.
#[derive(Error, Debug)]
#[error("middleware stage '{stage}' failed: {message}")]
pub struct MiddlewareError {
    /// Name of the failing stage, as reported by its `name()`.
    pub stage: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// The underlying error, if any.
    #[source]
    pub source: Option<anyhow::Error>,
}

impl MiddlewareError {
    /// Creates a middleware error with a message.
    #[must_use]
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a middleware error wrapping an underlying error.
    pub fn with_source(
        stage: &'static str,
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self {
            stage,
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
