//! Asset store forwarding to an upstream HTTP origin.
//!
//! # Responsibilities
//! - Rewrite the asset request onto the origin base URL
//! - Forward method and headers (minus `Host`)
//! - Stream the origin response back untouched
//!
//! # Design Decisions
//! - One attempt per lookup, no retries
//! - Connect timeout is set on the connector; overall request timeout is the
//!   transport's job
//! - Connection failures are store errors, origin 404s are plain responses

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, Uri},
    response::Response,
};
use futures_util::future::BoxFuture;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::store::{AssetRequest, AssetStore, StoreError};

/// Fetches assets from `origin` over HTTP.
#[derive(Debug, Clone)]
pub struct OriginStore {
    origin: Url,
    client: Client<HttpConnector, Body>,
}

impl OriginStore {
    /// Create a store for the origin at `origin` (e.g. `http://127.0.0.1:9000`).
    pub fn new(origin: &Url, connect_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            origin: origin.clone(),
            client,
        }
    }

    /// Origin URI for an asset request: origin scheme and authority, request
    /// path and query.
    fn upstream_uri(&self, request: &AssetRequest) -> Result<Uri, StoreError> {
        let mut url = self.origin.clone();
        url.set_path(request.path());
        url.set_query(request.uri.query());
        Ok(Uri::try_from(url.as_str())?)
    }

    async fn forward(&self, request: AssetRequest) -> Result<Response, StoreError> {
        let uri = self.upstream_uri(&request)?;

        let mut builder = Request::builder().method(request.method.clone()).uri(&uri);
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in request.headers.iter() {
                if name != header::HOST {
                    headers.append(name.clone(), value.clone());
                }
            }
        }
        let upstream = builder.body(Body::empty())?;

        tracing::trace!(uri = %uri, method = %request.method, "Fetching from origin");
        let response: hyper::Response<hyper::body::Incoming> =
            self.client.request(upstream).await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl AssetStore for OriginStore {
    fn fetch(&self, request: AssetRequest) -> BoxFuture<'_, Result<Response, StoreError>> {
        Box::pin(self.forward(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn store(origin: &str) -> OriginStore {
        OriginStore::new(&Url::parse(origin).unwrap(), Duration::from_secs(1))
    }

    fn request(uri: &str) -> AssetRequest {
        AssetRequest {
            method: Method::GET,
            uri: Uri::try_from(uri).unwrap(),
            headers: Default::default(),
        }
    }

    #[test]
    fn test_upstream_uri_uses_origin_authority() {
        let store = store("http://127.0.0.1:9000");
        let uri = store
            .upstream_uri(&request("https://example.com/fr/about.html?x=1"))
            .unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:9000/fr/about.html?x=1");
    }

    #[test]
    fn test_upstream_uri_without_query() {
        let store = store("http://assets.internal");
        let uri = store.upstream_uri(&request("/index.html")).unwrap();
        assert_eq!(uri.to_string(), "http://assets.internal/index.html");
    }

    #[tokio::test]
    async fn test_unreachable_origin_is_an_error() {
        // Nothing listens on the discard port
        let store = store("http://127.0.0.1:9");
        let result = store.fetch(request("/index.html")).await;
        assert!(matches!(result, Err(StoreError::Upstream(_))));
    }
}
