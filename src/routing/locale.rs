//! Supported site locales.

/// Language tags the site ships translations for.
///
/// Only the first path segment is ever compared against this list, and the
/// comparison is exact (`zh-TW` matches, `zh-tw` does not).
pub static SUPPORTED_LOCALES: &[&str] = &[
    "en", "ar", "be", "da", "de", "es", "fr", "id", "it", "nl", "pt", "tr", "vi", "zh", "zh-TW",
];

/// Returns true if `segment` names a supported locale.
pub fn is_supported_locale(segment: &str) -> bool {
    SUPPORTED_LOCALES.contains(&segment)
}
