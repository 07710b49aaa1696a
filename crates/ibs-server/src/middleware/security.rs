//! Security headers middleware.
//!
//! Every response carries the headers in [`SECURITY_HEADERS`], overriding any
//! value a handler set.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
///
/// Images come from the Sanity CDN and the stock photo hosts used by the
/// static pages; the contact page embeds a Google Maps frame.
const CSP: &str = "default-src 'self'; \
                   script-src 'self'; \
                   style-src 'self' 'unsafe-inline'; \
                   font-src 'self' data:; \
                   img-src 'self' data: https://cdn.sanity.io https://images.pexels.com https://images.unsplash.com; \
                   frame-src https://www.google.com; \
                   form-action 'self'; \
                   frame-ancestors 'none'";

pub(crate) const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// Add a [`SetResponseHeaderLayer`] per entry of [`SECURITY_HEADERS`].
pub(crate) fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csp_value() {
        assert!(CSP.contains("default-src 'self'"));
        assert!(CSP.contains("img-src 'self' data: https://cdn.sanity.io"));
        assert!(CSP.contains("frame-src https://www.google.com"));
        assert!(CSP.contains("frame-ancestors 'none'"));
    }

    #[test]
    fn test_header_names_are_lowercase() {
        for (name, _) in SECURITY_HEADERS {
            assert_eq!(*name, name.to_lowercase());
        }
    }
}
