//! Security response headers.
//!
//! # Responsibilities
//! - Mark HTML documents cross-origin isolated (COEP/COOP/CORP) so pages can
//!   use `SharedArrayBuffer`
//! - Give HTML documents a short public cache lifetime
//!
//! # Design Decisions
//! - Decided on `Content-Type` alone (case-sensitive `text/html` substring)
//! - Headers are set, never appended, so applying twice changes nothing
//! - Status and body are never touched

use axum::{
    http::{header, HeaderMap, HeaderName, HeaderValue},
    response::Response,
};

pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
pub const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

const HTML_CACHE_CONTROL: &str = "public, max-age=300";

/// Add isolation and cache headers to HTML responses.
pub fn with_security_headers(mut response: Response) -> Response {
    if is_html(response.headers()) {
        let headers = response.headers_mut();
        headers.insert(
            CROSS_ORIGIN_EMBEDDER_POLICY,
            HeaderValue::from_static("require-corp"),
        );
        headers.insert(
            CROSS_ORIGIN_OPENER_POLICY,
            HeaderValue::from_static("same-origin"),
        );
        headers.insert(
            CROSS_ORIGIN_RESOURCE_POLICY,
            HeaderValue::from_static("cross-origin"),
        );
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(HTML_CACHE_CONTROL),
        );
    }
    response
}

fn is_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("text/html"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};

    fn response(content_type: Option<&'static str>) -> Response {
        let mut response = Response::new(Body::from("<html></html>"));
        if let Some(ct) = content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        response
    }

    #[test]
    fn test_html_gets_isolation_headers() {
        let secured = with_security_headers(response(Some("text/html; charset=utf-8")));
        let headers = secured.headers();
        assert_eq!(headers["cross-origin-embedder-policy"], "require-corp");
        assert_eq!(headers["cross-origin-opener-policy"], "same-origin");
        assert_eq!(headers["cross-origin-resource-policy"], "cross-origin");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=300");
    }

    #[test]
    fn test_non_html_untouched() {
        for ct in [Some("application/javascript"), Some("TEXT/HTML"), None] {
            let before = response(ct);
            let expected = before.headers().clone();
            let after = with_security_headers(before);
            assert_eq!(after.headers(), &expected);
        }
    }

    #[test]
    fn test_existing_cache_control_is_replaced() {
        let mut html = response(Some("text/html"));
        html.headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        let secured = with_security_headers(html);
        let values: Vec<_> = secured.headers().get_all(header::CACHE_CONTROL).iter().collect();
        assert_eq!(values, vec!["public, max-age=300"]);
    }

    #[test]
    fn test_idempotent() {
        let once = with_security_headers(response(Some("text/html")));
        let expected = once.headers().clone();
        let twice = with_security_headers(once);
        assert_eq!(twice.headers(), &expected);
        assert_eq!(twice.headers().len(), 5);
        for name in [
            CROSS_ORIGIN_EMBEDDER_POLICY,
            CROSS_ORIGIN_OPENER_POLICY,
            CROSS_ORIGIN_RESOURCE_POLICY,
        ] {
            assert_eq!(twice.headers().get_all(name).iter().count(), 1);
        }
    }

    #[tokio::test]
    async fn test_status_and_body_preserved() {
        let mut html = response(Some("text/html"));
        *html.status_mut() = StatusCode::NOT_FOUND;
        let secured = with_security_headers(html);
        assert_eq!(secured.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(secured.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<html></html>");
    }
}
