//! # Kite App
//!
//! The Kite application core. An [`App`] owns the route table and the
//! middleware pipeline, and exposes one entry point to the host:
//! [`App::handle`], which turns a raw request descriptor into a rendered
//! response.
//!
//! The host owns the network listener, the accept loop, and all
//! concurrency; it calls `handle` once per inbound message. Registration
//! (`route`, `middleware`) is a setup-time operation: an `App` is expected
//! to be fully configured before the host begins serving, after which it is
//! only read.
//!
//! # Example
//!
//! ```rust
//! use http::StatusCode;
//! use kite_app::App;
//! use kite_core::{RawRequest, Request, Response};
//! use kite_router::Params;
//! use serde_json::json;
//!
//! fn index(_request: &Request, mut response: Response, _params: &Params) -> Response {
//!     response.set(json!({"message": "Hello, World!"}), StatusCode::OK);
//!     response
//! }
//!
//! let mut app = App::new();
//! app.route("/", index);
//!
//! let raw = RawRequest::builder().method("GET").target("/").build();
//! let rendered = app.handle(raw).unwrap();
//! assert_eq!(rendered.status(), StatusCode::OK);
//! ```

#![doc(html_root_url = "https://docs.rs/kite-app/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod app;

pub use app::{App, AppBuilder};
