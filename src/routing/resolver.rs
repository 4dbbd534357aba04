//! Request resolution against the asset store.
//!
//! # Responsibilities
//! - Serve extension paths with a single literal lookup
//! - Walk HTML candidates in priority order, first non-404 wins
//! - Fall back to `/index.html` for navigations, then `/404.html`
//!
//! # Design Decisions
//! - Lookups are sequential and short-circuit; a hit skips the rest
//! - Every lookup is attempted exactly once (no retries)
//! - Store errors propagate to the transport untouched

use std::fmt;

use axum::{
    http::{request::Parts, StatusCode},
    response::Response,
};

use crate::routing::candidates::make_html_candidate_paths;
use crate::routing::classify::{has_extension, is_navigation_request};
use crate::store::{not_found, AssetRequest, AssetStore, StoreError};

const SPA_INDEX: &str = "/index.html";
const NOT_FOUND_PAGE: &str = "/404.html";

/// How a request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Literal lookup of a path with an extension, passed through verbatim.
    Asset,
    /// One of the HTML candidates was found.
    Page,
    /// Navigation request answered with the root document.
    SpaFallback,
    /// Custom not-found page served with status 404.
    NotFoundPage,
    /// Nothing matched.
    NotFound,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Asset => "asset",
            Outcome::Page => "page",
            Outcome::SpaFallback => "spa_fallback",
            Outcome::NotFoundPage => "not_found_page",
            Outcome::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a GET/HEAD request to a response from `store`.
///
/// The method guard is the caller's job. Security headers are not applied
/// here.
pub async fn resolve_request<S>(request: &Parts, store: &S) -> Result<Response, StoreError>
where
    S: AssetStore + ?Sized,
{
    let path = request.uri.path();
    let (outcome, response) = resolve(request, store).await?;

    tracing::debug!(
        path = %path,
        outcome = %outcome,
        status = response.status().as_u16(),
        "Request resolved"
    );
    metrics::counter!("site_router_resolutions_total", "outcome" => outcome.as_str())
        .increment(1);

    Ok(response)
}

async fn resolve<S>(request: &Parts, store: &S) -> Result<(Outcome, Response), StoreError>
where
    S: AssetStore + ?Sized,
{
    let path = request.uri.path();

    if has_extension(path) {
        let response = fetch(request, store, path).await?;
        return Ok((Outcome::Asset, response));
    }

    for candidate in make_html_candidate_paths(path) {
        let response = fetch(request, store, &candidate).await?;
        if response.status() != StatusCode::NOT_FOUND {
            return Ok((Outcome::Page, response));
        }
    }

    if is_navigation_request(&request.headers) {
        let index = fetch(request, store, SPA_INDEX).await?;
        if index.status() != StatusCode::NOT_FOUND {
            return Ok((Outcome::SpaFallback, with_status(index, StatusCode::OK)));
        }
    }

    let page = fetch(request, store, NOT_FOUND_PAGE).await?;
    if page.status() != StatusCode::NOT_FOUND {
        return Ok((Outcome::NotFoundPage, with_status(page, StatusCode::NOT_FOUND)));
    }

    Ok((Outcome::NotFound, not_found()))
}

async fn fetch<S>(request: &Parts, store: &S, path: &str) -> Result<Response, StoreError>
where
    S: AssetStore + ?Sized,
{
    store.fetch(AssetRequest::for_path(request, path)?).await
}

fn with_status(mut response: Response, status: StatusCode) -> Response {
    *response.status_mut() = status;
    response
}
