//! Static asset serving.
//!
//! The stylesheet is embedded in the binary.

use std::sync::Arc;

use axum::Router;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;

use crate::state::AppState;

const STYLES: &str = include_str!("../assets/styles.css");

/// Create router for static assets.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().route("/assets/styles.css", get(styles))
}

async fn styles() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLES,
    )
}
