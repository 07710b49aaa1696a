//! Route patterns for invalidation.

/// One segment of a [`RoutePattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `[name]`: matches any single non-empty segment.
    Param,
}

/// Path pattern matching concrete routes.
///
/// Literal segments match exactly and `[name]` matches any single segment:
/// `/blog/[slug]` matches `/blog/hello` but neither `/blog` nor
/// `/blog/a/b`. Trailing slashes are ignored on both sides.
///
/// # Example
///
/// ```
/// use ibs_cache::RoutePattern;
///
/// let pattern = RoutePattern::parse("/events/[slug]");
/// assert!(pattern.matches("/events/summit-2024"));
/// assert!(!pattern.matches("/events"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern such as `/case-studies/[slug]`.
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|segment| {
                if segment.len() > 2 && segment.starts_with('[') && segment.ends_with(']') {
                    Segment::Param
                } else {
                    Segment::Literal(segment.to_owned())
                }
            })
            .collect();

        Self {
            source: pattern.to_owned(),
            segments,
        }
    }

    /// Pattern text as given to [`parse`](Self::parse).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether a concrete route matches this pattern.
    ///
    /// A query string on `route` is ignored.
    #[must_use]
    pub fn matches(&self, route: &str) -> bool {
        let path = route.split_once('?').map_or(route, |(path, _)| path);
        let mut route_segments = split(path);
        for segment in &self.segments {
            let Some(actual) = route_segments.next() else {
                return false;
            };
            if let Segment::Literal(expected) = segment
                && expected != actual
            {
                return false;
            }
        }
        route_segments.next().is_none()
    }
}

fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
