//! Handler errors and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use ibs_site::SiteError;
use serde_json::json;
use tokio::task::JoinError;

/// Error raised while handling a request.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// No record or route for the request.
    #[error("Not found: {0}")]
    NotFound(String),
    /// Page assembly failed upstream or in a template.
    #[error(transparent)]
    Site(SiteError),
    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] JoinError),
    /// Webhook call without the shared secret.
    #[error("Invalid secret")]
    InvalidSecret,
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::NotFound(what) => Self::NotFound(what),
            other => Self::Site(other),
        }
    }
}

impl ServerError {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidSecret => StatusCode::UNAUTHORIZED,
            Self::Site(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Bare responses, used when the site's own error pages cannot be rendered.
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::InvalidSecret => (status, Json(json!({ "error": "Invalid secret" }))).into_response(),
            Self::NotFound(_) => (status, Html("<h1>Page Not Found</h1>")).into_response(),
            Self::Site(_) | Self::Task(_) => {
                (status, Html("<h1>Something went wrong</h1>")).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ibs_content::ContentError;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_site_not_found_maps_to_404() {
        let err = ServerError::from(SiteError::NotFound("event 'x'".to_owned()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_content_failure_maps_to_500() {
        let err = ServerError::from(SiteError::Content(ContentError::Mock("down".to_owned())));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_invalid_secret_is_401() {
        let response = ServerError::InvalidSecret.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
