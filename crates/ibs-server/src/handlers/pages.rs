//! Page routes.
//!
//! Content-backed pages are cached under their request path and tagged with
//! the collections they show. The home page depends on the clock and static
//! pages are cheap, so both render per request.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Uri};
use axum::response::Response;
use ibs_site::tags;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handlers::{error_page, serve_page, serve_page_with};
use crate::state::AppState;

/// Query string of `GET /blog`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BlogQuery {
    category: Option<String>,
}

pub(crate) async fn home(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/".to_owned(), &[], |site| site.home()).await
}

pub(crate) async fn about(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/about".to_owned(), &[], |site| site.about()).await
}

pub(crate) async fn solutions(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/solutions".to_owned(), &[], |site| {
        site.solutions()
    })
    .await
}

/// Handle GET /blog, optionally filtered by `?category=`.
///
/// A filter naming no known category renders the empty state on every
/// request instead of adding a cache entry.
pub(crate) async fn blog_index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BlogQuery>,
    headers: HeaderMap,
) -> Response {
    let category = query.category.filter(|c| !c.is_empty());
    let route = match &category {
        Some(category) => format!("/blog?category={category}"),
        None => "/blog".to_owned(),
    };
    serve_page_with(state, &headers, route, &[tags::BLOG], move |site| {
        let index = site.blog_index(category.as_deref())?;
        Ok((index.html, !index.unknown_category))
    })
    .await
}

pub(crate) async fn blog_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let route = format!("/blog/{slug}");
    serve_page(state, &headers, route, &[tags::BLOG], move |site| {
        site.blog_post(&slug)
    })
    .await
}

pub(crate) async fn case_studies(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    serve_page(
        state,
        &headers,
        "/case-studies".to_owned(),
        &[tags::CASE_STUDIES],
        |site| site.case_studies(),
    )
    .await
}

pub(crate) async fn case_study(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let route = format!("/case-studies/{slug}");
    serve_page(state, &headers, route, &[tags::CASE_STUDIES], move |site| {
        site.case_study(&slug)
    })
    .await
}

pub(crate) async fn events(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/events".to_owned(), &[tags::EVENTS], |site| {
        site.events()
    })
    .await
}

pub(crate) async fn event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    let route = format!("/events/{slug}");
    serve_page(state, &headers, route, &[tags::EVENTS], move |site| {
        site.event(&slug)
    })
    .await
}

pub(crate) async fn awards(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    serve_page(state, &headers, "/awards".to_owned(), &[tags::AWARDS], |site| {
        site.awards()
    })
    .await
}

/// Fallback for unknown paths.
pub(crate) async fn not_found(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();
    error_page(&state, path, ServerError::NotFound(path.to_owned()))
}
