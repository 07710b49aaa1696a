//! Parameterized content queries.

use serde_json::{Map, Value};

/// A GROQ query with its parameters and cache tags.
///
/// The query text is opaque to this crate: it is sent to the content
/// repository as-is and parameters are bound by name (`$slug` in the query
/// text is bound by `.param("slug", ...)`).
///
/// # Example
///
/// ```
/// use ibs_content::Query;
///
/// let query = Query::new(r#"*[_type == "blog" && slug.current == $slug][0]"#)
///     .param("slug", "hello-world")
///     .tag("blog");
///
/// assert_eq!(query.params()["slug"], "hello-world");
/// assert_eq!(query.tags(), ["blog"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    groq: String,
    params: Map<String, Value>,
    tags: Vec<String>,
}

impl Query {
    /// Create a query without parameters.
    #[must_use]
    pub fn new(groq: impl Into<String>) -> Self {
        Self {
            groq: groq.into(),
            params: Map::new(),
            tags: Vec::new(),
        }
    }

    /// Bind a named parameter.
    #[must_use]
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_owned(), value.into());
        self
    }

    /// Attach a tag naming the content type this query reads.
    ///
    /// Tags are logged with the request; the render cache takes its tags
    /// from the page route, not from the queries a render ran.
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_owned());
        self
    }

    /// Query text.
    pub fn groq(&self) -> &str {
        &self.groq
    }

    /// Bound parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Cache tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
