//! `ETag` helpers for static assets

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Weak validator derived from the asset bytes, e.g. `"9f3a1c"`
pub fn etag_for(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Whether the client's `If-None-Match` already names this `ETag`.
///
/// Accepts a single tag, a comma-separated list, or `*`.
pub fn is_fresh(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_stable_and_quoted() {
        let a = etag_for(b"<h1>people</h1>");
        assert_eq!(a, etag_for(b"<h1>people</h1>"));
        assert_ne!(a, etag_for(b"<h1>products</h1>"));
        assert!(a.starts_with('"') && a.ends_with('"'));
    }

    #[test]
    fn test_is_fresh() {
        let etag = "\"abc123\"";
        assert!(is_fresh(Some("\"abc123\""), etag));
        assert!(is_fresh(Some("\"xyz\", \"abc123\""), etag));
        assert!(is_fresh(Some("*"), etag));
        assert!(!is_fresh(Some("\"different\""), etag));
        assert!(!is_fresh(None, etag));
    }
}
