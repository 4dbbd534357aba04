//! Asset store serving files from a local directory.
//!
//! # Responsibilities
//! - Map an asset path onto a file under the root, percent-decoding each segment
//! - Refuse traversal outside the root
//! - Guess `Content-Type` from the file extension
//!
//! # Design Decisions
//! - Missing files, directories, `..` segments and undecodable names answer 404
//! - Segments are checked after decoding, so `%2e%2e` and `%2f` are refused
//! - Any other I/O failure is a store error (the router must not mask it)

use std::io::ErrorKind;
use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use futures_util::future::BoxFuture;
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::store::{not_found, AssetRequest, AssetStore, StoreError};

/// Serves assets from files under `root`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an asset path to a file path.
    ///
    /// `None` if a segment is not valid UTF-8 once decoded or would escape
    /// the root.
    fn file_path(&self, asset_path: &str) -> Option<PathBuf> {
        let mut file_path = self.root.clone();
        for raw in asset_path.split('/').filter(|s| !s.is_empty()) {
            let segment = percent_decode_str(raw).decode_utf8().ok()?;
            if segment == ".." || segment.contains(['/', '\\', '\0']) {
                return None;
            }
            file_path.push(&*segment);
        }
        Some(file_path)
    }

    async fn load(&self, request: AssetRequest) -> Result<Response, StoreError> {
        let Some(file_path) = self.file_path(request.path()) else {
            tracing::warn!(path = %request.path(), "Asset path rejected");
            return Ok(not_found());
        };

        let metadata = match fs::metadata(&file_path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Ok(not_found()),
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                return Ok(not_found());
            }
            Err(e) => return Err(e.into()),
        };

        let body = if request.is_head() {
            Body::empty()
        } else {
            Body::from(fs::read(&file_path).await?)
        };

        let content_type = mime_guess::from_path(&file_path).first_or_octet_stream();
        let mut response = Response::new(body);
        *response.status_mut() = StatusCode::OK;
        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
            headers.insert(header::CONTENT_TYPE, value);
        }
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(metadata.len()));

        tracing::trace!(path = %file_path.display(), bytes = metadata.len(), "Asset loaded");
        Ok(response)
    }
}

impl AssetStore for DirectoryStore {
    fn fetch(&self, request: AssetRequest) -> BoxFuture<'_, Result<Response, StoreError>> {
        Box::pin(self.load(request))
    }
}
