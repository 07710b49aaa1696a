//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{contact, pages, revalidate};
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/solutions", get(pages::solutions))
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/blog", get(pages::blog_index))
        .route("/blog/{slug}", get(pages::blog_post))
        .route("/case-studies", get(pages::case_studies))
        .route("/case-studies/{slug}", get(pages::case_study))
        .route("/events", get(pages::events))
        .route("/events/{slug}", get(pages::event))
        .route("/awards", get(pages::awards));

    let api_routes = Router::new().route("/api/revalidate", post(revalidate::revalidate));

    let router = Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .merge(static_files::static_router())
        .fallback(pages::not_found)
        .with_state(state);

    security::with_security_headers(router).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use ibs_cache::{MemoryCache, RenderCache};
    use ibs_content::{ContentSource, ImageUrlBuilder, MockContentSource};
    use ibs_site::Site;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const SECRET: &str = "s3cret";

    struct Harness {
        router: Router,
        source: Arc<MockContentSource>,
        cache: Arc<MemoryCache>,
    }

    fn harness(source: MockContentSource) -> Harness {
        let source = Arc::new(source);
        let cache = Arc::new(MemoryCache::new());
        let site = Site::new(
            Arc::clone(&source) as Arc<dyn ContentSource>,
            ImageUrlBuilder::new("proj", "prod"),
        )
        .unwrap();
        let state = Arc::new(AppState {
            site,
            cache: Arc::clone(&cache) as Arc<dyn RenderCache>,
            revalidate_secret: SECRET.to_owned(),
            verbose: false,
            version: "test".to_owned(),
        });
        Harness {
            router: create_router(state),
            source,
            cache,
        }
    }

    fn awards() -> Value {
        json!([{"_id": "a1", "title": "Best Treasury Platform", "year": 2023}])
    }

    async fn get(router: &Router, uri: &str) -> Response {
        router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn revalidate(router: &Router, secret: Option<&str>) -> Response {
        let mut request = Request::post("/api/revalidate");
        if let Some(secret) = secret {
            request = request.header("x-sanity-secret", secret);
        }
        router
            .clone()
            .oneshot(request.body(Body::from("{}")).unwrap())
            .await
            .unwrap()
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_static_page_with_headers() {
        let h = harness(MockContentSource::new());

        let response = get(&h.router, "/about").await;

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=60");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        assert!(headers.contains_key("content-security-policy"));
        assert!(body(response).await.contains("Our Story"));
    }

    #[tokio::test]
    async fn test_if_none_match_returns_304() {
        let h = harness(MockContentSource::new());

        let first = get(&h.router, "/solutions").await;
        let etag = first.headers()[header::ETAG].clone();

        let second = h
            .router
            .clone()
            .oneshot(
                Request::get("/solutions")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_page() {
        let h = harness(MockContentSource::new());

        let response = get(&h.router, "/nope").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body(response).await.contains("Page Not Found"));
    }

    #[tokio::test]
    async fn test_missing_slug_is_404_page() {
        let h = harness(MockContentSource::new().with_result("slug.current == $slug", Value::Null));

        let response = get(&h.router, "/events/missing").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body(response).await.contains("Page Not Found"));
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_hides_details() {
        let h = harness(MockContentSource::new().with_failure(r#"_type == "awards""#, "token expired"));

        let response = get(&h.router, "/awards").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = body(response).await;
        assert!(html.contains("Something Went Wrong"));
        assert!(!html.contains("token expired"));
    }

    #[tokio::test]
    async fn test_content_pages_are_cached_until_revalidated() {
        let h = harness(MockContentSource::new().with_result(r#"_type == "awards""#, awards()));

        assert_eq!(get(&h.router, "/awards").await.status(), StatusCode::OK);
        assert_eq!(get(&h.router, "/awards").await.status(), StatusCode::OK);
        assert_eq!(h.source.executed().len(), 1);

        let response = revalidate(&h.router, Some(SECRET)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body(response).await).unwrap();
        assert_eq!(json, json!({"revalidated": true}));
        assert!(h.cache.is_empty());

        assert_eq!(get(&h.router, "/awards").await.status(), StatusCode::OK);
        assert_eq!(h.source.executed().len(), 2);
    }

    #[tokio::test]
    async fn test_revalidate_rejects_bad_secret() {
        let h = harness(MockContentSource::new().with_result(r#"_type == "awards""#, awards()));
        get(&h.router, "/awards").await;

        for secret in [None, Some("wrong"), Some("")] {
            let response = revalidate(&h.router, secret).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let json: Value = serde_json::from_str(&body(response).await).unwrap();
            assert_eq!(json, json!({"error": "Invalid secret"}));
        }
        assert_eq!(h.cache.len(), 1);
    }

    #[tokio::test]
    async fn test_blog_category_cached_separately() {
        let h = harness(MockContentSource::new().with_result(
            r#"_type == "blog""#,
            json!([
                {"_id": "p1", "title": "Cash pooling", "slug": {"current": "p1"}, "categories": ["Treasury"]},
                {"_id": "p2", "title": "Fraud basics", "slug": {"current": "p2"}, "categories": ["Risk"]},
            ]),
        ));

        let all = body(get(&h.router, "/blog").await).await;
        let risk = body(get(&h.router, "/blog?category=Risk").await).await;

        assert!(all.contains("Cash pooling") && all.contains("Fraud basics"));
        assert!(risk.contains("Fraud basics") && !risk.contains("Cash pooling"));
        assert_eq!(h.cache.len(), 2);

        revalidate(&h.router, Some(SECRET)).await;
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_blog_categories_are_not_cached() {
        let h = harness(MockContentSource::new().with_result(
            r#"_type == "blog""#,
            json!([
                {"_id": "p1", "title": "Cash pooling", "slug": {"current": "p1"}, "categories": ["Treasury"]},
            ]),
        ));

        for i in 0..50 {
            let response = get(&h.router, &format!("/blog?category=junk{i}")).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body(response).await.contains("No articles found"));
        }
        assert!(h.cache.is_empty());

        get(&h.router, "/blog?category=Treasury").await;
        get(&h.router, "/blog?category=Treasury").await;
        assert_eq!(h.cache.len(), 1);
        assert_eq!(h.source.executed().len(), 51);
    }

    #[tokio::test]
    async fn test_contact_submission() {
        let h = harness(MockContentSource::new());

        let post = |fields: &[(&str, &str)]| {
            let form = serde_urlencoded::to_string(fields).unwrap();
            h.router.clone().oneshot(
                Request::post("/contact")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form))
                    .unwrap(),
            )
        };

        let invalid = post(&[("name", "A"), ("email", "nope")]).await.unwrap();
        assert_eq!(invalid.status(), StatusCode::OK);
        let html = body(invalid).await;
        assert!(html.contains("Name must be at least 2 characters."));
        assert!(html.contains("Please enter a valid email address."));

        let valid = post(&[
            ("name", "Ada Lovelace"),
            ("email", "ada@example.com"),
            ("subject", "Demo request"),
            ("message", "Please show us the treasury module."),
        ])
        .await
        .unwrap();
        assert!(body(valid).await.contains("Message Sent!"));
    }

    #[tokio::test]
    async fn test_stylesheet_served() {
        let h = harness(MockContentSource::new());

        let response = get(&h.router, "/assets/styles.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
    }
}
