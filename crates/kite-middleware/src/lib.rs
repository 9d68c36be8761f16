//! # Kite Middleware
//!
//! Two-phase middleware pipeline for the Kite application core.
//!
//! Every request flows through the pipeline twice:
//!
//! ```text
//! Request  → stage A.process_request → stage B.process_request → handler
//!                                                                    ↓
//! Response ← stage A.process_response ← stage B.process_response ←──┘
//! ```
//!
//! Registration order defines the pre-phase order; the post-phase runs in
//! the exact reverse order. There is no short-circuiting hook: every
//! registered stage's phase executes for every request. A stage that fails
//! does so through its `Result`, and that failure propagates straight out
//! of the pipeline to the application boundary; nothing is caught and
//! partially applied stages are not rolled back.

#![doc(html_root_url = "https://docs.rs/kite-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod middleware;
pub mod pipeline;

pub use kite_core::MiddlewareError;
pub use middleware::Middleware;
pub use pipeline::{BoxedStage, Pipeline};
