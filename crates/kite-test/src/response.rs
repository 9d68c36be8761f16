//! Test response wrapper.

use bytes::Bytes;
use http::{header, StatusCode};
use kite_core::RenderedResponse;
use serde::de::DeserializeOwned;

use crate::error::TestError;

/// A rendered response with helper methods for assertions.
#[derive(Debug, Clone)]
pub struct TestResponse {
    inner: RenderedResponse,
}

impl From<RenderedResponse> for TestResponse {
    fn from(inner: RenderedResponse) -> Self {
        Self { inner }
    }
}

impl TestResponse {
    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Returns the status code as a u16.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns the status line.
    #[must_use]
    pub fn status_line(&self) -> String {
        self.inner.status_line()
    }

    /// Returns true if the status is successful (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref().to_ascii_lowercase();
        self.inner
            .headers()
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .and_then(|(_, v)| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE.as_str())
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        self.inner.body()
    }

    /// Returns the body as a string.
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> Result<String, TestError> {
        String::from_utf8(self.inner.body().to_vec())
            .map_err(|e| TestError::BodyRead(format!("Invalid UTF-8: {e}")))
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TestError> {
        serde_json::from_slice(self.inner.body()).map_err(TestError::Json)
    }

    // Assertion methods

    /// Asserts that the status code equals the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the status code doesn't match.
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status(),
            expected,
            "Expected status {}, got {}",
            expected,
            self.status()
        );
        self
    }

    /// Asserts that the Content-Type header matches.
    ///
    /// # Panics
    ///
    /// Panics if Content-Type doesn't match.
    pub fn assert_content_type(&self, expected: impl AsRef<str>) -> &Self {
        let expected = expected.as_ref();
        let actual = self.content_type().expect("Content-Type header not found");
        assert!(
            actual.starts_with(expected),
            "Content-Type: expected '{}', got '{}'",
            expected,
            actual
        );
        self
    }

    /// Asserts that the body equals the expected string.
    ///
    /// # Panics
    ///
    /// Panics if the body doesn't match.
    pub fn assert_body_eq(&self, expected: impl AsRef<str>) -> &Self {
        let body = self.text().expect("Body should be valid UTF-8");
        assert_eq!(body, expected.as_ref(), "Body mismatch");
        self
    }

    /// Asserts that the JSON body matches the expected value.
    ///
    /// # Panics
    ///
    /// Panics if the JSON doesn't match.
    pub fn assert_json_eq(&self, expected: &serde_json::Value) -> &Self {
        let actual: serde_json::Value = self.json().expect("Body should be valid JSON");
        assert_eq!(&actual, expected, "JSON body mismatch");
        self
    }
}
