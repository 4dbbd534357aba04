//! In-process asset store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use futures_util::future::BoxFuture;

use crate::store::{not_found, AssetRequest, AssetStore, StoreError};

/// A stored asset.
#[derive(Debug, Clone)]
pub struct MemoryAsset {
    pub status: StatusCode,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

impl MemoryAsset {
    /// A 200 response with the given content type.
    pub fn new(content_type: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: Some(content_type),
            body: body.into(),
        }
    }

    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::new("text/html", body)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }
}

/// Asset store backed by a map from path to asset.
///
/// Every looked-up path is recorded in order, see [`MemoryStore::lookups`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    assets: HashMap<String, MemoryAsset>,
    lookups: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the asset at `path`.
    pub fn insert(&mut self, path: impl Into<String>, asset: MemoryAsset) {
        self.assets.insert(path.into(), asset);
    }

    pub fn with_asset(mut self, path: impl Into<String>, asset: MemoryAsset) -> Self {
        self.insert(path, asset);
        self
    }

    /// Paths fetched so far, oldest first.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, request: &AssetRequest) -> Response {
        let Some(asset) = self.assets.get(request.path()) else {
            return not_found();
        };

        let body = if request.is_head() {
            Body::empty()
        } else {
            Body::from(asset.body.clone())
        };
        let mut response = Response::new(body);
        *response.status_mut() = asset.status;
        if let Some(content_type) = asset.content_type {
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        response
    }
}

impl AssetStore for MemoryStore {
    fn fetch(&self, request: AssetRequest) -> BoxFuture<'_, Result<Response, StoreError>> {
        self.lookups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.path().to_string());
        let response = self.respond(&request);
        Box::pin(async move { Ok(response) })
    }
}
