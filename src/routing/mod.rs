//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, headers)
//!     → classify.rs (concrete file or page?)
//!     → candidates.rs (ordered HTML asset keys, locale aware)
//!     → resolver.rs (sequential store lookups, fallback chain)
//!     → Return: Response or StoreError
//! ```
//!
//! # Design Decisions
//! - Supported locales are compiled in, immutable at runtime
//! - Candidate order is the priority contract: first hit wins
//! - Paths with an extension are never rewritten
//! - Store failures propagate, they are never reported as 404

pub mod candidates;
pub mod classify;
pub mod locale;
pub mod resolver;

pub use candidates::make_html_candidate_paths;
pub use classify::{has_extension, is_navigation_request};
pub use locale::{is_supported_locale, SUPPORTED_LOCALES};
pub use resolver::{resolve_request, Outcome};
