//! HTML candidate path generation.
//!
//! # Responsibilities
//! - Map an extension-less request path to the stored HTML files it may name
//! - Detect an optional leading locale segment
//! - Append default-locale fallbacks for localized pages
//!
//! # Design Decisions
//! - Pure function, no store access
//! - Order encodes priority: exact page, directory index, then the same two
//!   without the locale prefix
//! - Never returns an empty list

use crate::routing::locale::is_supported_locale;

const ROOT_INDEX: &str = "/index.html";

/// Build the ordered list of asset keys to try for `path`.
///
/// ```text
/// /           → /index.html
/// /about      → /about.html, /about/index.html
/// /fr         → /fr/index.html, /index.html
/// /fr/about   → /fr/about.html, /fr/about/index.html, /about.html, /about/index.html
/// ```
pub fn make_html_candidate_paths(path: &str) -> Vec<String> {
    if path == "/" {
        return vec![ROOT_INDEX.to_string()];
    }

    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    let (locale, rest) = match segments.split_first() {
        Some((first, rest)) if is_supported_locale(first) => (Some(*first), rest),
        _ => (None, segments.as_slice()),
    };

    if rest.is_empty() {
        return match locale {
            Some(locale) => vec![format!("/{locale}{ROOT_INDEX}"), ROOT_INDEX.to_string()],
            None => vec![ROOT_INDEX.to_string()],
        };
    }

    let rest_path = rest.join("/");
    let mut candidates = Vec::with_capacity(4);
    if let Some(locale) = locale {
        push_page_candidates(&mut candidates, &format!("/{locale}"), &rest_path);
    }
    push_page_candidates(&mut candidates, "", &rest_path);
    candidates
}

fn push_page_candidates(candidates: &mut Vec<String>, base: &str, rest_path: &str) {
    candidates.push(format!("{base}/{rest_path}.html"));
    candidates.push(format!("{base}/{rest_path}/index.html"));
}
