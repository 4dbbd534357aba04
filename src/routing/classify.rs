//! Request classification.
//!
//! # Responsibilities
//! - Decide whether a path already names a concrete file
//! - Decide whether a request is a top-level document load
//!
//! # Design Decisions
//! - Only the last path segment is inspected for an extension
//! - `sec-fetch-dest` wins over `accept` when present and equal to `document`

use axum::http::{header, HeaderMap};

const SEC_FETCH_DEST: &str = "sec-fetch-dest";

/// Returns true if the last segment of `path` contains a `.`.
///
/// A path ending in `/` has an empty last segment, so `/` and `/docs/` are
/// never treated as files.
pub fn has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.contains('.'))
}

/// Returns true if the headers describe a browser navigation.
///
/// Used to gate the single-page-app fallback so that API and sub-resource
/// fetches get a real 404 instead of the root document.
pub fn is_navigation_request(headers: &HeaderMap) -> bool {
    let dest = headers.get(SEC_FETCH_DEST).and_then(|v| v.to_str().ok());
    if dest == Some("document") {
        return true;
    }

    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}
