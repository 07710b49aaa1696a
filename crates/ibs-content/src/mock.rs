//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without network access.

use std::sync::RwLock;

use serde_json::Value;

use crate::error::ContentError;
use crate::query::Query;
use crate::source::ContentSource;

/// Canned response for queries whose text contains a pattern.
#[derive(Debug)]
enum Response {
    Result(Value),
    Failure(String),
}

/// Mock content source for testing.
///
/// Responses are registered against substrings of the query text; the first
/// registered pattern contained in an executed query wins. Unmatched queries
/// fail with [`ContentError::Mock`].
///
/// # Example
///
/// ```ignore
/// use ibs_content::{ContentSourceExt, MockContentSource, Query};
/// use serde_json::json;
///
/// let source = MockContentSource::new()
///     .with_result(r#"_type == "awards""#, json!([]));
///
/// let awards: Vec<serde_json::Value> = source.fetch(&Query::new(r#"*[_type == "awards"]"#))?;
/// assert!(awards.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    responses: RwLock<Vec<(String, Response)>>,
    executed: RwLock<Vec<Query>>,
}

impl MockContentSource {
    /// Create a new mock without responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `pattern` with `result`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_result(self, pattern: impl Into<String>, result: Value) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((pattern.into(), Response::Result(result)));
        self
    }

    /// Fail queries containing `pattern`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(self, pattern: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .write()
            .unwrap()
            .push((pattern.into(), Response::Failure(message.into())));
        self
    }

    /// Queries executed so far, in execution order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn executed(&self) -> Vec<Query> {
        self.executed.read().unwrap().clone()
    }
}

impl ContentSource for MockContentSource {
    fn fetch_raw(&self, query: &Query) -> Result<Value, ContentError> {
        self.executed.write().unwrap().push(query.clone());

        let responses = self.responses.read().unwrap();
        let response = responses
            .iter()
            .find(|(pattern, _)| query.groq().contains(pattern.as_str()))
            .map(|(_, response)| response);

        match response {
            Some(Response::Result(value)) => Ok(value.clone()),
            Some(Response::Failure(message)) => Err(ContentError::Mock(message.clone())),
            None => Err(ContentError::Mock(format!(
                "no response registered for query: {}",
                query.groq()
            ))),
        }
    }
}
