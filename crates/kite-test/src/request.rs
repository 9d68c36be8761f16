//! Test request building.

use bytes::Bytes;
use kite_core::RawRequest;
use serde::Serialize;

/// Entry points for building test requests.
///
/// Each method returns a [`TestRequestBuilder`] whose `build()` produces
/// the [`RawRequest`] an application's `handle` accepts.
pub struct TestRequest;

impl TestRequest {
    /// Creates a new GET request builder.
    pub fn get(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new("GET", target)
    }

    /// Creates a new POST request builder.
    pub fn post(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new("POST", target)
    }

    /// Creates a new PUT request builder.
    pub fn put(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new("PUT", target)
    }

    /// Creates a new PATCH request builder.
    pub fn patch(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new("PATCH", target)
    }

    /// Creates a new DELETE request builder.
    pub fn delete(target: impl AsRef<str>) -> TestRequestBuilder {
        TestRequestBuilder::new("DELETE", target)
    }
}

/// Builder for constructing test requests.
#[must_use]
#[derive(Debug)]
pub struct TestRequestBuilder {
    method: String,
    target: String,
    headers: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl TestRequestBuilder {
    /// Creates a new request builder.
    pub fn new(method: impl Into<String>, target: impl AsRef<str>) -> Self {
        Self {
            method: method.into(),
            target: target.as_ref().to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Appends a header.
    ///
    /// Names may be given in transport form; the application core
    /// normalizes them.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the Content-Type header.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        self.header("Content-Type", content_type)
    }

    /// Appends a cookie to the `Cookie` header.
    pub fn cookie(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let pair = format!("{}={}", name.as_ref(), value.as_ref());
        if let Some((_, existing)) = self
            .headers
            .iter_mut()
            .find(|(header, _)| header.eq_ignore_ascii_case("Cookie"))
        {
            existing.push_str("; ");
            existing.push_str(&pair);
            self
        } else {
            self.header("Cookie", pair)
        }
    }

    /// Sets the raw request body. The declared content length follows the
    /// buffer length.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the request body as JSON.
    ///
    /// This also sets the `Content-Type` header to `application/json`.
    pub fn json<T: Serialize>(self, value: &T) -> Self {
        let bytes = serde_json::to_vec(value).expect("JSON serialization should succeed");
        self.body(bytes).content_type("application/json")
    }

    /// Builds the raw request.
    pub fn build(self) -> RawRequest {
        let mut builder = RawRequest::builder()
            .method(self.method)
            .target(self.target);

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = self.body {
            builder = builder.body(body);
        }

        builder.build()
    }
}
