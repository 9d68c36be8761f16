//! # Kite Test
//!
//! Test utilities for the Kite application core: in-memory request
//! building and response assertions, with no network connections and no
//! port binding.
//!
//! ## Example
//!
//! ```ignore
//! use http::StatusCode;
//! use kite_test::{TestRequest, TestResponse};
//! use serde_json::json;
//!
//! let raw = TestRequest::get("/").build();
//! let response = TestResponse::from(app.handle(raw).unwrap());
//!
//! response
//!     .assert_status(StatusCode::OK)
//!     .assert_content_type("application/json")
//!     .assert_json_eq(&json!({"message": "Hello, World!"}));
//! ```

#![doc(html_root_url = "https://docs.rs/kite-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod request;
mod response;

pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
