//! # Kite Core
//!
//! Core types for the Kite HTTP application core:
//!
//! - [`RawRequest`]: the descriptor a host hands over per inbound message
//! - [`Request`]: the normalized, immutable request model
//! - [`Response`]: the mutable response accumulator
//! - [`RenderedResponse`]: the wire-ready (status, headers, bytes) triple
//! - [`Handler`]: the trait dispatched handlers implement
//! - [`KiteError`]: the error taxonomy surfaced by the application core
//!
//! The host owns the network listener and all concurrency; everything in
//! this crate is synchronous and operates on exactly one request at a time.

#![doc(html_root_url = "https://docs.rs/kite-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod handler;
pub mod request;
pub mod response;

pub use error::{KiteError, KiteResult, MiddlewareError};
pub use handler::Handler;
pub use request::{RawRequest, RawRequestBuilder, Request};
pub use response::{Body, RenderedResponse, Response};
