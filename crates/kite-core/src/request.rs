//! Request handling and normalization.
//!
//! A host hands the core one [`RawRequest`] per inbound message: method,
//! request target, the header list in whatever form the transport surfaces
//! it, and a body source of known length. [`Request::from_raw`] normalizes
//! that into the immutable [`Request`] model that handlers and middleware
//! see.
//!
//! The only I/O performed here is the eager, bounded read of the declared
//! body length. When no length is declared (or it is zero) the body source
//! is never touched.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};

use bytes::Bytes;
use http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;

use crate::error::{KiteError, KiteResult};

/// The request descriptor a host hands over per inbound message.
///
/// Everything is optional at this layer; [`Request::from_raw`] decides what
/// is required and fails with [`KiteError::MalformedRequest`] when method or
/// path information is missing.
///
/// # Example
///
/// ```rust
/// use kite_core::{RawRequest, Request};
///
/// let raw = RawRequest::builder()
///     .method("get")
///     .target("/search?q=kite")
///     .header("HTTP_ACCEPT_LANGUAGE", "en")
///     .build();
///
/// let request = Request::from_raw(raw).unwrap();
/// assert_eq!(request.method(), &http::Method::GET);
/// assert_eq!(request.path(), "/search");
/// ```
pub struct RawRequest {
    method: Option<String>,
    target: Option<String>,
    headers: Vec<(String, String)>,
    content_length: u64,
    body: Option<Box<dyn Read + Send>>,
}

impl RawRequest {
    /// Creates a new raw request builder.
    #[must_use]
    pub fn builder() -> RawRequestBuilder {
        RawRequestBuilder::new()
    }

    /// Returns the method string, if one was provided.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Returns the request target (path plus optional query), if provided.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Returns the transport-form header list.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Returns the declared content length.
    #[must_use]
    pub fn content_length(&self) -> u64 {
        self.content_length
    }
}

impl fmt::Debug for RawRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRequest")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Builder for constructing a [`RawRequest`].
///
/// Hosts adapt their native message representation through this builder;
/// tests use it directly.
#[must_use]
pub struct RawRequestBuilder {
    method: Option<String>,
    target: Option<String>,
    headers: Vec<(String, String)>,
    content_length: Option<u64>,
    body: Option<Box<dyn Read + Send>>,
}

impl RawRequestBuilder {
    /// Creates a new builder with nothing set.
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            headers: Vec::new(),
            content_length: None,
            body: None,
        }
    }

    /// Sets the request method as received from the transport.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the request target: the path with an optional `?query` suffix.
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Appends a header in transport form.
    ///
    /// Names may arrive in transport shape (for instance
    /// `HTTP_ACCEPT_LANGUAGE`); normalization happens in
    /// [`Request::from_raw`].
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the declared content length explicitly.
    pub fn content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }

    /// Sets the body from an in-memory buffer.
    ///
    /// Also declares the buffer's length as the content length unless a
    /// length was already set explicitly.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        if self.content_length.is_none() {
            self.content_length = Some(body.len() as u64);
        }
        self.body = Some(Box::new(io::Cursor::new(body)));
        self
    }

    /// Sets the body from a reader with an explicitly declared length.
    pub fn body_reader(mut self, reader: impl Read + Send + 'static, declared: u64) -> Self {
        self.content_length = Some(declared);
        self.body = Some(Box::new(reader));
        self
    }

    /// Builds the raw request.
    pub fn build(self) -> RawRequest {
        RawRequest {
            method: self.method,
            target: self.target,
            headers: self.headers,
            content_length: self.content_length.unwrap_or(0),
            body: self.body,
        }
    }
}

impl Default for RawRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RawRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRequestBuilder")
            .field("method", &self.method)
            .field("target", &self.target)
            .field("headers", &self.headers)
            .field("content_length", &self.content_length)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// The normalized, immutable request model.
///
/// Built once per inbound call from the raw host message and discarded when
/// the call returns. All access goes through getters; middleware that needs
/// to steer resolution replaces the request via [`Request::with_path`]
/// rather than mutating it.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    query_params: IndexMap<String, Vec<String>>,
    cookies: HashMap<String, String>,
    body: Bytes,
}

impl Request {
    /// Normalizes a raw host message into a `Request`.
    ///
    /// - the method is uppercased and parsed into [`http::Method`]
    ///   (extension methods are allowed);
    /// - the target is split at `?`; the path portion is percent-decoded;
    /// - header names are normalized (optional `HTTP_` transport prefix
    ///   stripped, underscores folded to hyphens, canonical case) and
    ///   unparseable entries are skipped with a warning;
    /// - the query string is parsed into a multi-valued mapping;
    /// - the body is read eagerly, exactly the declared length, only when
    ///   that length is greater than zero;
    /// - cookies are parsed from the `Cookie` header, last value wins.
    ///
    /// # Errors
    ///
    /// [`KiteError::MalformedRequest`] when method or path information is
    /// missing or the method is unparseable; [`KiteError::BodyRead`] when
    /// the declared-length read fails or comes up short.
    pub fn from_raw(raw: RawRequest) -> KiteResult<Self> {
        let RawRequest {
            method,
            target,
            headers: raw_headers,
            content_length,
            body,
        } = raw;

        let method = method.ok_or_else(|| KiteError::malformed("missing request method"))?;
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|_| KiteError::malformed(format!("invalid request method '{method}'")))?;

        let target = target.ok_or_else(|| KiteError::malformed("missing request path"))?;
        let (raw_path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target.as_str(), None),
        };
        let path = percent_decode_str(raw_path).decode_utf8_lossy().into_owned();

        let mut headers = HeaderMap::new();
        for (raw_name, raw_value) in &raw_headers {
            let Some(name) = normalize_header_name(raw_name) else {
                tracing::warn!(header = %raw_name, "skipping header with invalid name");
                continue;
            };
            let Ok(value) = HeaderValue::from_str(raw_value) else {
                tracing::warn!(header = %raw_name, "skipping header with invalid value");
                continue;
            };
            headers.append(name, value);
        }

        let query_params = raw_query.map(parse_query).unwrap_or_default();

        let body = read_body(body, content_length)?;

        let cookies = headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(parse_cookies)
            .unwrap_or_default();

        Ok(Self {
            method,
            path,
            headers,
            query_params,
            cookies,
            body,
        })
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the decoded request path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a copy of this request with a different path.
    ///
    /// The request model itself is immutable; a middleware that wants to
    /// steer resolution returns a replacement built this way.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Returns the normalized headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header_str(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|value| value.to_str().ok())
    }

    /// Returns the multi-valued query parameter mapping.
    #[must_use]
    pub fn query_params(&self) -> &IndexMap<String, Vec<String>> {
        &self.query_params
    }

    /// Returns every value supplied for a query key.
    #[must_use]
    pub fn query_values(&self, name: &str) -> Option<&[String]> {
        self.query_params.get(name).map(Vec::as_slice)
    }

    /// Returns the first value supplied for a query key.
    #[must_use]
    pub fn query_first(&self, name: &str) -> Option<&str> {
        self.query_values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the cookie mapping.
    #[must_use]
    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    /// Returns a cookie value by name.
    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Returns the request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Normalizes a transport-form header name into canonical form.
///
/// Strips the optional `HTTP_` prefix and folds underscores to hyphens;
/// `HeaderName` parsing takes care of canonical casing.
fn normalize_header_name(raw: &str) -> Option<HeaderName> {
    let stripped = raw.strip_prefix("HTTP_").unwrap_or(raw);
    let folded = stripped.replace('_', "-");
    HeaderName::from_bytes(folded.as_bytes()).ok()
}

/// Parses a query string into an insertion-ordered multi-valued mapping.
///
/// Repeated keys accumulate values in order of appearance; a bare key
/// contributes an empty value.
fn parse_query(query: &str) -> IndexMap<String, Vec<String>> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_else(|error| {
        tracing::warn!(%error, "failed to parse query string");
        Vec::new()
    });

    let mut params: IndexMap<String, Vec<String>> = IndexMap::new();
    for (key, value) in pairs {
        params.entry(key).or_default().push(value);
    }
    params
}

/// Parses a `Cookie` header value. Last value wins for repeated names.
fn parse_cookies(header_value: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for cookie in header_value.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            let value = value.trim().trim_matches('"');
            cookies.insert(name.trim().to_string(), value.to_string());
        }
    }

    cookies
}

/// Reads exactly the declared number of bytes, or nothing at all when no
/// length is declared.
fn read_body(body: Option<Box<dyn Read + Send>>, content_length: u64) -> KiteResult<Bytes> {
    if content_length == 0 {
        return Ok(Bytes::new());
    }

    let declared = usize::try_from(content_length).map_err(|_| {
        KiteError::body_read(
            content_length,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "declared length exceeds addressable memory",
            ),
        )
    })?;

    let mut reader = body.ok_or_else(|| {
        KiteError::body_read(
            content_length,
            io::Error::new(io::ErrorKind::UnexpectedEof, "no body source provided"),
        )
    })?;

    let mut buffer = vec![0u8; declared];
    reader
        .read_exact(&mut buffer)
        .map_err(|source| KiteError::body_read(content_length, source))?;

    Ok(Bytes::from(buffer))
}
