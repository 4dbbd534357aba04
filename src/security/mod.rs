//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved response:
//!     → headers.rs (cross-origin isolation + cache headers on HTML)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Runs on every response the transport returns
//! - Only adds headers, never rewrites status or body

pub mod headers;

pub use headers::with_security_headers;
