//! Handler trait for request dispatch.
//!
//! A handler receives the immutable [`Request`], the [`Response`]
//! accumulated so far, and the bindings captured during route resolution.
//! It may mutate the passed response and return it, or build and return a
//! new one; either way the returned value is authoritative.

use kite_router::Params;

use crate::request::Request;
use crate::response::Response;

/// A dispatched request handler.
///
/// Any plain function or closure with the matching signature implements
/// this trait via the blanket impl below, so handlers are ordinarily
/// written as free functions:
///
/// ```rust
/// use http::StatusCode;
/// use kite_core::{Handler, Request, Response};
/// use kite_router::Params;
/// use serde_json::json;
///
/// fn hello(_request: &Request, mut response: Response, params: &Params) -> Response {
///     let name = params.get("name").unwrap_or("world");
///     response.set(json!({ "message": format!("Hello, {name}") }), StatusCode::OK);
///     response
/// }
///
/// let handler: Box<dyn Handler> = Box::new(hello);
/// ```
pub trait Handler: Send + Sync + 'static {
    /// Handles a resolved request and returns the authoritative response.
    fn call(&self, request: &Request, response: Response, params: &Params) -> Response;
}

impl<F> Handler for F
where
    F: Fn(&Request, Response, &Params) -> Response + Send + Sync + 'static,
{
    fn call(&self, request: &Request, response: Response, params: &Params) -> Response {
        self(request, response, params)
    }
}
