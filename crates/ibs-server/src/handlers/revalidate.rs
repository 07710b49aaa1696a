//! Revalidation webhook.
//!
//! Called by the CMS after content changes. Drops every cached page built
//! from CMS content; the next request for each renders fresh.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use ibs_cache::RoutePattern;
use ibs_site::tags;
use serde::Serialize;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::ServerError;
use crate::state::AppState;

/// Header carrying the shared secret.
const SECRET_HEADER: &str = "x-sanity-secret";

/// Route patterns dropped on every revalidation.
const ROUTES: &[&str] = &[
    "/blog",
    "/blog/[slug]",
    "/events",
    "/events/[slug]",
    "/case-studies",
    "/case-studies/[slug]",
    "/awards",
];

/// Content tags dropped on every revalidation.
const TAGS: &[&str] = &[tags::BLOG, tags::CASE_STUDIES, tags::EVENTS, tags::AWARDS];

#[derive(Debug, Serialize)]
struct RevalidateResponse {
    revalidated: bool,
}

/// Handle POST /api/revalidate. The request body is ignored.
pub(crate) async fn revalidate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ServerError> {
    let provided = headers
        .get(SECRET_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !secret_matches(provided, &state.revalidate_secret) {
        tracing::warn!("Revalidation rejected: invalid secret");
        return Err(ServerError::InvalidSecret);
    }

    let mut removed = 0;
    for route in ROUTES {
        removed += state.cache.invalidate_route(&RoutePattern::parse(route));
    }
    for tag in TAGS {
        removed += state.cache.invalidate_tag(tag);
    }
    tracing::info!(removed, "Revalidated content pages");

    Ok(Json(RevalidateResponse { revalidated: true }))
}

/// Compare a provided secret with the configured one.
///
/// Both sides are hashed first so the comparison time does not depend on
/// either length. An empty configured secret never matches.
fn secret_matches(provided: &str, expected: &str) -> bool {
    if expected.is_empty() || provided.is_empty() {
        return false;
    }
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    provided.as_slice().ct_eq(expected.as_slice()).into()
}
