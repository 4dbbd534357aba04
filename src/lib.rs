//! Static site router.
//!
//! Maps request paths of a multilingual static site onto stored HTML
//! assets, with locale-aware fallbacks, single-page-app navigation fallback
//! and cross-origin isolation headers on every HTML document.
//!
//! ```text
//!   request ──▶ http::server ──▶ routing::resolver ──▶ store (directory | origin | memory)
//!                   │                    │
//!                   │           classify + candidates
//!                   ▼
//!          security::headers ──▶ response
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod store;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::resolve_request;
pub use security::with_security_headers;
pub use store::{AssetRequest, AssetStore, StoreError};
