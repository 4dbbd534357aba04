//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the site handler
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Reject methods other than GET and HEAD
//! - Dispatch requests to the resolver and decorate the response
//! - Map store failures to 502 Bad Gateway

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RouterConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::observability::metrics;
use crate::routing::resolve_request;
use crate::security::with_security_headers;
use crate::store::AssetStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AssetStore>,
}

/// HTTP server for the site router.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server resolving against `store`.
    pub fn new(config: RouterConfig, store: Arc<dyn AssetStore>) -> Self {
        let router = build_router(&config, AppState { store });
        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Returns once `shutdown` fires or Ctrl+C is received and in-flight
    /// requests have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &RouterConfig, state: AppState) -> Router {
    Router::new()
        .route("/", any(site_handler))
        .route("/{*path}", any(site_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
}

/// Main site handler.
/// Guards the method, resolves the path and decorates the response.
async fn site_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, _body) = request.into_parts();
    let request_id = request_id(&parts.headers).to_string();
    let method = parts.method.clone();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %parts.uri.path(),
        "Routing request"
    );

    let response = if method != Method::GET && method != Method::HEAD {
        tracing::warn!(request_id = %request_id, method = %method, "Method not allowed");
        method_not_allowed()
    } else {
        match resolve_request(&parts, state.store.as_ref()).await {
            Ok(response) => with_security_headers(response),
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    path = %parts.uri.path(),
                    error = %e,
                    "Asset store failed"
                );
                (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response()
            }
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}

fn method_not_allowed() -> Response {
    let mut response = (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
    response
}

/// Wait for the shutdown broadcast or Ctrl+C.
///
/// Dropping the broadcast sender also counts as a shutdown.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = shutdown.recv() => {}
        _ = ctrl_c => {}
    }
    tracing::info!("Shutdown signal received");
}
