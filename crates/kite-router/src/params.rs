//! Placeholder binding storage.
//!
//! Bindings are stored as ordered (name, value) pairs in the order the
//! placeholders appear in the pattern.

/// Bindings extracted from a route match.
///
/// # Example
///
/// ```rust
/// use kite_router::Params;
///
/// let mut params = Params::new();
/// params.push("user", "ada");
/// params.push("action", "view");
///
/// assert_eq!(params.get("user"), Some("ada"));
/// assert_eq!(params.get("unknown"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    inner: Vec<(String, String)>,
}

impl Params {
    /// Creates a new empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding to the set.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.push((name.into(), value.into()));
    }

    /// Returns the value bound under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if no bindings were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the bindings in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}
