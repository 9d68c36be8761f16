//! Pattern parsing and structural matching.
//!
//! A pattern string is split on `/` into segments at registration time.
//! Empty segments are kept, which is what makes matching trailing-slash
//! sensitive: `/users` parses to two segments, `/users/` to three.

use crate::params::Params;

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches the identical path segment only.
    Literal(String),
    /// A `{name}` placeholder: matches any non-empty path segment and binds
    /// its value under `name`.
    Param(String),
}

/// A route pattern compiled from its string form.
///
/// The original string is retained so duplicate registrations of the
/// identical pattern can be detected.
///
/// # Example
///
/// ```rust
/// use kite_router::Pattern;
///
/// let pattern = Pattern::parse("/hello/{name}");
/// let params = pattern.matches("/hello/Ada").unwrap();
/// assert_eq!(params.get("name"), Some("Ada"));
///
/// assert!(pattern.matches("/hello").is_none());
/// assert!(pattern.matches("/hello/Ada/extra").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern string into its segments.
    ///
    /// A segment of the form `{name}` with a non-empty name becomes a
    /// placeholder; everything else, including an empty segment, is a
    /// literal.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Some(name) if !name.is_empty() => Segment::Param(name.to_string()),
                    _ => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Attempts a full structural match against `path`.
    ///
    /// The path must have the same segment count as the pattern; literal
    /// segments must compare equal and placeholders bind any non-empty
    /// segment. Returns the captured bindings on success.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let mut params = Params::new();
        let mut pattern_segments = self.segments.iter();
        let mut path_segments = path.split('/');

        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (None, None) => return Some(params),
                (Some(Segment::Literal(literal)), Some(segment)) if literal == segment => {}
                (Some(Segment::Param(name)), Some(segment)) if !segment.is_empty() => {
                    params.push(name.clone(), segment.to_string());
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals_and_params() {
        let pattern = Pattern::parse("/users/{id}/posts");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal(String::new()),
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string()),
                Segment::Literal("posts".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_braces_are_literal() {
        let pattern = Pattern::parse("/x/{}");
        assert_eq!(
            pattern.segments()[2],
            Segment::Literal("{}".to_string())
        );
    }

    #[test]
    fn test_match_root() {
        let pattern = Pattern::parse("/");
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/x").is_none());
    }

    #[test]
    fn test_match_binds_value() {
        let pattern = Pattern::parse("/hello/{name}");
        let params = pattern.matches("/hello/Ada").unwrap();
        assert_eq!(params.get("name"), Some("Ada"));
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        let pattern = Pattern::parse("/hello/{name}");
        assert!(pattern.matches("/hello/").is_none());
    }

    #[test]
    fn test_segment_count_must_agree() {
        let pattern = Pattern::parse("/a/b");
        assert!(pattern.matches("/a").is_none());
        assert!(pattern.matches("/a/b/c").is_none());
    }

    #[test]
    fn test_trailing_slash_mismatch() {
        assert!(Pattern::parse("/users").matches("/users/").is_none());
        assert!(Pattern::parse("/users/").matches("/users").is_none());
    }

    #[test]
    fn test_as_str_round_trip() {
        let pattern = Pattern::parse("/hello/{name}");
        assert_eq!(pattern.as_str(), "/hello/{name}");
    }
}
