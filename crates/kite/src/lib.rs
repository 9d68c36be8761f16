//! # Kite
//!
//! **A minimal synchronous HTTP application core.**
//!
//! Kite accepts an inbound request descriptor from a hosting server,
//! resolves it to a registered handler via path-pattern matching, runs the
//! handler inside an ordered two-phase middleware pipeline, and produces a
//! normalized response the host can transmit.
//!
//! The host owns the listener, the accept loop, and all concurrency; Kite
//! owns everything between `handle(raw)` and the rendered response.
//!
//! ## Quick Start
//!
//! ```rust
//! use kite::prelude::*;
//! use http::StatusCode;
//! use serde_json::json;
//!
//! fn index(_request: &Request, mut response: Response, _params: &Params) -> Response {
//!     response.set(json!({"message": "Hello, World!"}), StatusCode::OK);
//!     response
//! }
//!
//! fn hello(_request: &Request, mut response: Response, params: &Params) -> Response {
//!     let name = params.get("name").unwrap_or("world");
//!     response.set(json!({"message": format!("Hello, {name}")}), StatusCode::OK);
//!     response
//! }
//!
//! let mut app = App::new();
//! app.route("/", index);
//! app.route("/hello/{name}", hello);
//!
//! let raw = RawRequest::builder().method("GET").target("/hello/Ada").build();
//! let rendered = app.handle(raw).unwrap();
//! assert_eq!(rendered.status_line(), "200 OK");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! host → RawRequest → Request ─→ pre-phase (registration order)
//!                                    ↓
//!                              route resolve → handler / 404
//!                                    ↓
//! host ← RenderedResponse ←─ post-phase (reverse order)
//! ```

#![doc(html_root_url = "https://docs.rs/kite/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use kite_core as core;

// Re-export the application core
pub use kite_app as app;

// Re-export middleware types
pub use kite_middleware as middleware;

// Re-export router types
pub use kite_router as router;

// Re-export telemetry types
pub use kite_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use kite::prelude::*;
/// ```
pub mod prelude {
    pub use kite_app::{App, AppBuilder};
    pub use kite_core::{
        Body, Handler, KiteError, KiteResult, MiddlewareError, RawRequest, RenderedResponse,
        Request, Response,
    };
    pub use kite_middleware::{Middleware, Pipeline};
    pub use kite_router::{Params, RouteMatch, Router};
    pub use kite_telemetry::{init_logging, LogConfig};
}
