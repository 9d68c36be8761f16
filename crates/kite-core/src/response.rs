//! Response accumulation and rendering.
//!
//! [`Response`] is the mutable accumulator handlers and middleware write
//! into; [`Response::render`] turns it into the wire-ready
//! [`RenderedResponse`] triple the host transmits verbatim.
//!
//! Structured bodies stay structured until render time: a JSON body is
//! serialized, and the content type forced to `application/json`, only when
//! `render` runs. A response left without both a status and a body renders
//! as the fixed internal-error representation instead of failing the
//! request cycle.

use bytes::Bytes;
use http::{header, HeaderName, HeaderValue, StatusCode};

/// Default content type for responses that never set one.
const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Fixed body of the internal-error representation.
const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// A response body in one of the shapes handlers produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Structured data, serialized to JSON at render time.
    Json(serde_json::Value),
    /// Plain text, emitted under the accumulated content type.
    Text(String),
    /// Raw bytes, emitted under the accumulated content type.
    Bytes(Bytes),
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

/// The mutable response accumulator.
///
/// One `Response` is created empty per dispatch and threaded through the
/// middleware pipeline and the handler; whatever comes out of the pipeline
/// post-phase is rendered and returned to the host.
///
/// # Example
///
/// ```rust
/// use http::StatusCode;
/// use kite_core::Response;
/// use serde_json::json;
///
/// let mut response = Response::new();
/// response.set(json!({"message": "Hello, World!"}), StatusCode::OK);
///
/// let rendered = response.render();
/// assert_eq!(rendered.status(), StatusCode::OK);
/// assert_eq!(rendered.body().as_ref(), br#"{"message":"Hello, World!"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Option<StatusCode>,
    content_type: String,
    body: Option<Body>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// Creates an empty response: no status, no body, `text/plain` content
    /// type.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            body: None,
        }
    }

    /// Creates a response with body and status already assigned.
    #[must_use]
    pub fn with(body: impl Into<Body>, status: StatusCode) -> Self {
        let mut response = Self::new();
        response.set(body, status);
        response
    }

    /// Assigns body and status together.
    pub fn set(&mut self, body: impl Into<Body>, status: StatusCode) {
        self.body = Some(body.into());
        self.status = Some(status);
    }

    /// Assigns the status code.
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    /// Assigns the body, leaving the status untouched.
    pub fn set_body(&mut self, body: impl Into<Body>) {
        self.body = Some(body.into());
    }

    /// Overrides the content type used for text and byte bodies.
    ///
    /// JSON bodies always render as `application/json` regardless of this
    /// setting.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = content_type.into();
    }

    /// Returns the accumulated status, if set.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Returns the accumulated content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the accumulated body, if set.
    #[must_use]
    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Renders the accumulated state into the wire-ready triple.
    ///
    /// Rendering is read-only and idempotent: calling it twice on an
    /// unmodified response yields byte-identical output.
    ///
    /// A response missing its status or its body renders as the fixed
    /// internal-error representation. That condition is a defect in the
    /// handler or pipeline, so it is logged, but it never fails the request.
    #[must_use]
    pub fn render(&self) -> RenderedResponse {
        let (Some(status), Some(body)) = (self.status, self.body.as_ref()) else {
            tracing::warn!(
                has_status = self.status.is_some(),
                has_body = self.body.is_some(),
                "rendering response that was never fully populated"
            );
            return RenderedResponse::internal_error();
        };

        let (content_type, bytes) = match body {
            Body::Json(value) => ("application/json".to_string(), Bytes::from(value.to_string())),
            Body::Text(text) => (self.content_type.clone(), Bytes::copy_from_slice(text.as_bytes())),
            Body::Bytes(bytes) => (self.content_type.clone(), bytes.clone()),
        };

        RenderedResponse::new(status, &content_type, bytes)
    }
}

/// The wire-ready (status, headers, bytes) triple.
///
/// The host transmits this verbatim; the core guarantees exactly one
/// `Content-Type` header reflecting the final content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
}

impl RenderedResponse {
    fn new(status: StatusCode, content_type: &str, body: Bytes) -> Self {
        let content_type = HeaderValue::from_str(content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CONTENT_TYPE));

        Self {
            status,
            headers: vec![(header::CONTENT_TYPE, content_type)],
            body,
        }
    }

    /// The fixed internal-error representation: 500, `text/plain`, fixed
    /// body. Used when a response was never populated.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            DEFAULT_CONTENT_TYPE,
            Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes()),
        )
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the ordered header list.
    #[must_use]
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Returns a header value by name.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the body bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the status line: the numeric code followed by the
    /// conventional reason phrase for that code.
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }
}
