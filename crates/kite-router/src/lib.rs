//! Registration-ordered path pattern router for Kite.
//!
//! This crate stores route patterns in registration order and resolves an
//! incoming path with a linear first-match scan. Patterns are literal path
//! segments interspersed with named placeholders (`/users/{id}`); a
//! placeholder matches exactly one non-empty segment and binds its value.
//!
//! # Example
//!
//! ```rust
//! use kite_router::Router;
//!
//! let mut router = Router::new();
//! router.register("/users", "listUsers");
//! router.register("/users/{id}", "getUser");
//!
//! let matched = router.resolve("/users/123").unwrap();
//! assert_eq!(*matched.handler, "getUser");
//! assert_eq!(matched.params.get("id"), Some("123"));
//! ```
//!
//! # Resolution semantics
//!
//! Resolution is intentionally a linear scan, not a longest-prefix or
//! priority trie. When patterns overlap, the one registered earliest wins,
//! so registration order is part of the observable contract and is preserved
//! exactly. Registering an identical pattern string a second time replaces
//! the stored handler in place (last registration wins) without disturbing
//! the pattern's position in the scan order.
//!
//! Matching is trailing-slash sensitive in both directions: `/users` does
//! not match `/users/` and vice versa.

mod params;
mod pattern;
mod router;

pub use params::Params;
pub use pattern::{Pattern, Segment};
pub use router::Router;

/// A matched route: the stored handler plus the bindings extracted from the
/// path.
///
/// `Params` are produced fresh for every successful resolution; they are
/// never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The handler registered for the matched pattern.
    pub handler: &'a T,
    /// Extracted placeholder bindings.
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(handler: &'a T, params: Params) -> Self {
        Self { handler, params }
    }
}
