//! Application core: registration and per-request dispatch.

use http::StatusCode;

use kite_core::{Handler, KiteResult, RawRequest, RenderedResponse, Request, Response};
use kite_middleware::{Middleware, Pipeline};
use kite_router::Router;

/// Fixed body of the not-found response.
const NOT_FOUND_BODY: &str = "Not found.";

/// The application core.
///
/// Composes the router and the middleware pipeline around handler dispatch.
/// One `App` serves many requests; each call to [`App::handle`] works on
/// its own request/response pair and shares nothing with concurrent calls
/// beyond read-only access to the route table and stage list.
pub struct App {
    router: Router<Box<dyn Handler>>,
    pipeline: Pipeline,
    debug: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an application with no routes, no middleware, and debug
    /// diagnostics off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            pipeline: Pipeline::new(),
            debug: false,
        }
    }

    /// Creates an application builder.
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Registers a handler under a path pattern.
    ///
    /// Patterns mix literal segments with `{name}` placeholders. Repeating
    /// an identical pattern silently replaces the earlier handler.
    pub fn route<H: Handler>(&mut self, pattern: &str, handler: H) {
        self.router.register(pattern, Box::new(handler));
    }

    /// Appends a middleware stage to the pipeline.
    pub fn middleware<M: Middleware>(&mut self, stage: M) {
        self.pipeline.add_stage(stage);
    }

    /// Returns the route table.
    #[must_use]
    pub fn router(&self) -> &Router<Box<dyn Handler>> {
        &self.router
    }

    /// Returns the middleware pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Returns true if debug diagnostics are enabled.
    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    /// Handles one inbound message from the host.
    ///
    /// The dispatch sequence per request:
    ///
    /// 1. normalize the raw descriptor into a [`Request`];
    /// 2. construct an empty [`Response`];
    /// 3. run the pipeline pre-phase over the pair;
    /// 4. resolve the (possibly pipeline-updated) path against the router;
    /// 5. on a hit, invoke the handler with the extracted bindings; on a
    ///    miss, produce the fixed not-found response;
    /// 6. run the pipeline post-phase in reverse order;
    /// 7. render the final response for the host to transmit.
    ///
    /// # Errors
    ///
    /// Fails without producing a response when the raw input is missing
    /// method or path information, when the declared-length body read
    /// fails, or when a middleware stage fails in either phase. An
    /// unmatched route is not an error; it yields the 404 response.
    pub fn handle(&self, raw: RawRequest) -> KiteResult<RenderedResponse> {
        let request = Request::from_raw(raw)?;
        let response = Response::new();

        let (request, response) = self.pipeline.run_pre(request, response)?;

        if self.debug {
            tracing::debug!(
                http.method = %request.method(),
                http.path = %request.path(),
                "dispatching request"
            );
        }

        let response = match self.router.resolve(request.path()) {
            Some(matched) => matched.handler.call(&request, response, &matched.params),
            None => Self::not_found(),
        };

        let response = self.pipeline.run_post(&request, response)?;

        Ok(response.render())
    }

    /// The fixed not-found response.
    fn not_found() -> Response {
        Response::with(NOT_FOUND_BODY, StatusCode::NOT_FOUND)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("routes", &self.router.len())
            .field("stages", &self.pipeline.stage_names())
            .field("debug", &self.debug)
            .finish()
    }
}

/// Builder for configuring an [`App`] before serving.
///
/// # Example
///
/// ```rust
/// use kite_app::App;
///
/// let app = App::builder().debug(true).build();
/// assert!(app.debug_enabled());
/// ```
#[derive(Default)]
#[must_use]
pub struct AppBuilder {
    pipeline: Pipeline,
    debug: bool,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the per-request debug diagnostic.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Appends a middleware stage.
    pub fn middleware<M: Middleware>(mut self, stage: M) -> Self {
        self.pipeline.add_stage(stage);
        self
    }

    /// Builds the application. Routes are registered on the built value.
    pub fn build(self) -> App {
        App {
            router: Router::new(),
            pipeline: self.pipeline,
            debug: self.debug,
        }
    }
}
