//! Asset store subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver picks a candidate path
//!     → AssetRequest::for_path (method + headers kept, path replaced)
//!     → AssetStore::fetch
//!         → directory.rs (files under a local root)
//!         → origin.rs    (upstream HTTP origin)
//!         → memory.rs    (in-process map)
//!     → Response (404 means "not here", anything else is a hit)
//! ```
//!
//! # Design Decisions
//! - Missing assets are a 404 response, not an error
//! - Errors mean the store itself failed and must not be masked
//! - Object-safe trait so the backend is chosen from config at startup

pub mod directory;
pub mod memory;
pub mod origin;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{
        header, request::Parts, uri::PathAndQuery, HeaderMap, HeaderValue, Method, StatusCode, Uri,
    },
    response::Response,
};
use futures_util::future::BoxFuture;

use crate::config::StoreConfig;

pub use directory::DirectoryStore;
pub use memory::MemoryStore;
pub use origin::OriginStore;

/// Error type for asset store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading from the local filesystem failed.
    #[error("asset store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The upstream origin could not be reached.
    #[error("upstream origin request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The asset URI could not be built.
    #[error("invalid asset URI: {0}")]
    InvalidUri(#[from] axum::http::uri::InvalidUri),

    /// The candidate path could not be combined with the request URI.
    #[error("invalid asset URI parts: {0}")]
    InvalidUriParts(#[from] axum::http::uri::InvalidUriParts),

    /// The outgoing request could not be assembled.
    #[error("invalid asset request: {0}")]
    Request(#[from] axum::http::Error),
}

/// A request for a single asset, derived from the client request.
#[derive(Debug, Clone)]
pub struct AssetRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl AssetRequest {
    /// Copy `parts`, replacing the URI path with `path` and keeping the query.
    pub fn for_path(parts: &Parts, path: &str) -> Result<Self, StoreError> {
        let path_and_query = match parts.uri.query() {
            Some(query) => format!("{path}?{query}"),
            None => path.to_string(),
        };
        let mut uri_parts = parts.uri.clone().into_parts();
        uri_parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
        let uri = Uri::from_parts(uri_parts)?;

        Ok(Self {
            method: parts.method.clone(),
            uri,
            headers: parts.headers.clone(),
        })
    }

    /// The asset key: the URI path.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Fetch-by-path capability the router resolves against.
pub trait AssetStore: Send + Sync {
    /// Look up the asset named by `request.path()`.
    ///
    /// A missing asset is `Ok` with status 404.
    fn fetch(&self, request: AssetRequest) -> BoxFuture<'_, Result<Response, StoreError>>;
}

/// Build the configured store.
pub fn from_config(config: &StoreConfig, connect_timeout: Duration) -> Arc<dyn AssetStore> {
    match config {
        StoreConfig::Directory { root } => {
            tracing::info!(root = %root.display(), "Serving assets from directory");
            Arc::new(DirectoryStore::new(root))
        }
        StoreConfig::Origin { url } => {
            tracing::info!(origin = %url, "Serving assets from upstream origin");
            Arc::new(OriginStore::new(url, connect_timeout))
        }
    }
}

/// Plain-text 404 for missing keys and exhausted fallbacks.
pub(crate) fn not_found() -> Response {
    let mut response = Response::new(Body::from("Not Found"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
