//! Test error types.

use thiserror::Error;

/// Errors from test request building and response inspection.
#[derive(Debug, Error)]
pub enum TestError {
    /// The response body was not what the accessor expected.
    #[error("Body read error: {0}")]
    BodyRead(String),

    /// JSON deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TestError::BodyRead("not UTF-8".to_string());
        assert_eq!(err.to_string(), "Body read error: not UTF-8");
    }
}
