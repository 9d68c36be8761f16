//! The pattern table and first-match resolution.

use crate::params::Params;
use crate::pattern::Pattern;
use crate::RouteMatch;

/// An insertion-ordered table mapping path patterns to handlers.
///
/// The router is generic over the stored handler type so that the matching
/// logic stays independent of any particular handler signature.
///
/// # Example
///
/// ```rust
/// use kite_router::Router;
///
/// let mut router = Router::new();
/// router.register("/hello/{name}", "sayHello");
///
/// let matched = router.resolve("/hello/Ada").unwrap();
/// assert_eq!(*matched.handler, "sayHello");
/// assert_eq!(matched.params.get("name"), Some("Ada"));
/// ```
///
/// # Ordering
///
/// Routes are scanned in registration order and the first full structural
/// match wins. Overlapping patterns are legal; the earliest registration
/// takes precedence. The table is expected to be fully populated before
/// serving begins and is read-only during dispatch.
#[derive(Debug, Clone)]
pub struct Router<T> {
    routes: Vec<(Pattern, T)>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers a pattern.
    ///
    /// Registering the identical pattern string a second time silently
    /// replaces the previously stored handler, keeping the route's original
    /// position in the scan order.
    pub fn register(&mut self, pattern: &str, handler: T) {
        if let Some(route) = self
            .routes
            .iter_mut()
            .find(|(existing, _)| existing.as_str() == pattern)
        {
            route.1 = handler;
        } else {
            self.routes.push((Pattern::parse(pattern), handler));
        }
    }

    /// Resolves a path to the first structurally matching route.
    ///
    /// Returns the stored handler together with a fresh [`Params`] set, or
    /// `None` when no registered pattern matches.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        self.routes.iter().find_map(|(pattern, handler)| {
            pattern
                .matches(path)
                .map(|params| RouteMatch::new(handler, params))
        })
    }

    /// Returns the registered pattern strings in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|(pattern, _)| pattern.as_str())
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Resolves a path and discards the handler, returning only the
    /// bindings. Useful for introspection and tests.
    #[must_use]
    pub fn resolve_params(&self, path: &str) -> Option<Params> {
        self.resolve(path).map(|matched| matched.params)
    }
}
