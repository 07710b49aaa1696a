//! Content source trait.
//!
//! [`ContentSource`] is the seam between page assembly and the content
//! repository: [`SanityClient`](crate::SanityClient) talks HTTP, while
//! `MockContentSource` (behind the `mock` feature) serves canned results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContentError;
use crate::query::Query;

/// Read-only access to the content repository.
///
/// Implementations execute a query and return its JSON result untouched.
/// There is no retry: a failure is returned to the caller as-is.
pub trait ContentSource: Send + Sync {
    /// Execute a query and return the raw `result` value.
    fn fetch_raw(&self, query: &Query) -> Result<Value, ContentError>;
}

/// Typed convenience methods for [`ContentSource`].
///
/// Kept as an extension trait so that [`ContentSource`] stays object-safe.
pub trait ContentSourceExt: ContentSource {
    /// Execute a query and deserialize its result.
    ///
    /// Use for list queries and for single-record queries whose result is
    /// never `null`.
    fn fetch<T: DeserializeOwned>(&self, query: &Query) -> Result<T, ContentError> {
        let value = self.fetch_raw(query)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Execute a single-record query.
    ///
    /// Returns `Ok(None)` when the repository answers `null` (no record
    /// matched).
    fn fetch_optional<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>, ContentError> {
        let value = self.fetch_raw(query)?;
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }
}

impl<S: ContentSource + ?Sized> ContentSourceExt for S {}
