//! HTTP request handlers.

pub(crate) mod contact;
pub(crate) mod pages;
pub(crate) mod revalidate;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use ibs_cache::RenderCacheExt;
use ibs_site::{Site, SiteError};
use md5::{Digest, Md5};

use crate::error::ServerError;
use crate::state::AppState;

/// Render a page off the async runtime and answer with it.
///
/// With non-empty `tags` the page is read through the render cache under
/// `route`; with no tags it is rendered on every request. Failures are
/// answered with the site's not-found or error page.
pub(crate) async fn serve_page<F>(
    state: Arc<AppState>,
    headers: &HeaderMap,
    route: String,
    tags: &'static [&'static str],
    render: F,
) -> Response
where
    F: FnOnce(&Site) -> Result<String, SiteError> + Send + 'static,
{
    serve_page_with(state, headers, route, tags, move |site| {
        render(site).map(|html| (html, true))
    })
    .await
}

/// [`serve_page`] for renders that decide whether their output is cached.
pub(crate) async fn serve_page_with<F>(
    state: Arc<AppState>,
    headers: &HeaderMap,
    route: String,
    tags: &'static [&'static str],
    render: F,
) -> Response
where
    F: FnOnce(&Site) -> Result<(String, bool), SiteError> + Send + 'static,
{
    let task_state = Arc::clone(&state);
    let key = route.clone();
    let result = tokio::task::spawn_blocking(move || {
        if tags.is_empty() {
            render(&task_state.site).map(|(html, _)| html)
        } else {
            task_state
                .cache
                .get_or_render_with(&key, tags, || render(&task_state.site))
        }
    })
    .await;

    match result {
        Ok(Ok(html)) => {
            if state.verbose {
                tracing::info!(route = %route, bytes = html.len(), "Served page");
            }
            html_response(&state, headers, html)
        }
        Ok(Err(err)) => error_page(&state, &route, err.into()),
        Err(err) => error_page(&state, &route, err.into()),
    }
}

/// Answer with a rendered page, honouring `If-None-Match`.
fn html_response(state: &AppState, headers: &HeaderMap, html: String) -> Response {
    let etag = compute_etag(&state.version, &html);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return StatusCode::NOT_MODIFIED.into_response();
    }

    (
        [
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
        ],
        Html(html),
    )
        .into_response()
}

/// Answer a failed request with the matching site page.
///
/// Upstream details go to the log only.
pub(crate) fn error_page(state: &AppState, path: &str, err: ServerError) -> Response {
    let status = err.status();
    let page = if status == StatusCode::NOT_FOUND {
        tracing::debug!(path, error = %err, "Not found");
        state.site.not_found(path)
    } else {
        tracing::error!(path, error = %err, "Page render failed");
        state.site.error_page(path)
    };

    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(page_err) => {
            tracing::error!(path, error = %page_err, "Error page render failed");
            err.into_response()
        }
    }
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_content() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert_eq!(etag.len(), 18);
    }
}
