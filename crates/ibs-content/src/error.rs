//! Error types for content queries.

/// Error from content repository operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Response envelope did not contain a `result` field.
    #[error("query response has no result")]
    MissingResult,

    /// Failure injected by a mock source.
    #[error("mock error: {0}")]
    Mock(String),
}
