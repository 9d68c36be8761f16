//! Core middleware trait.

use kite_core::{MiddlewareError, Request, Response};

/// A middleware stage.
///
/// Any type providing the two processing methods qualifies; there is no
/// base type to inherit from. Both methods have passthrough defaults, so a
/// stage that only cares about one phase implements just that one.
///
/// The request is received by value: a stage that wants to steer routing
/// returns a replacement (see [`Request::with_path`]) rather than mutating
/// shared state.
///
/// # Example
///
/// ```rust
/// use kite_core::{MiddlewareError, Request, Response};
/// use kite_middleware::Middleware;
///
/// struct ServerBanner;
///
/// impl Middleware for ServerBanner {
///     fn name(&self) -> &'static str {
///         "server-banner"
///     }
///
///     fn process_response(
///         &self,
///         _request: &Request,
///         mut response: Response,
///     ) -> Result<Response, MiddlewareError> {
///         response.set_content_type("text/plain; charset=utf-8");
///         Ok(response)
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this stage, used for logs and error
    /// attribution.
    fn name(&self) -> &'static str;

    /// Processes the request before dispatch.
    ///
    /// Runs in registration order across the pipeline. The possibly
    /// updated request/response pair is threaded into the next stage.
    fn process_request(
        &self,
        request: Request,
        response: Response,
    ) -> Result<(Request, Response), MiddlewareError> {
        Ok((request, response))
    }

    /// Processes the response after dispatch.
    ///
    /// Runs in reverse registration order across the pipeline. The stage
    /// may replace the body or status entirely; the returned response is
    /// what flows onward.
    fn process_response(
        &self,
        request: &Request,
        response: Response,
    ) -> Result<Response, MiddlewareError> {
        let _ = request;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use kite_core::RawRequest;

    struct Passthrough;

    impl Middleware for Passthrough {
        fn name(&self) -> &'static str {
            "passthrough"
        }
    }

    fn request() -> Request {
        let raw = RawRequest::builder().method("GET").target("/").build();
        Request::from_raw(raw).unwrap()
    }

    #[test]
    fn test_default_phases_pass_through() {
        let stage = Passthrough;
        let response = Response::with("ok", StatusCode::OK);

        let (request, response) = stage.process_request(request(), response).unwrap();
        let response = stage.process_response(&request, response).unwrap();

        assert_eq!(response.status(), Some(StatusCode::OK));
    }

    #[test]
    fn test_name() {
        assert_eq!(Passthrough.name(), "passthrough");
    }
}
