//! HTTP cache control module
//!
//! Provides `ETag` generation, HTTP-date handling, conditional request
//! evaluation and the cache policies used by the fallback router.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// One year, the lifetime of fingerprinted build assets
pub const IMMUTABLE_MAX_AGE: u32 = 31_536_000;

/// Generate `ETag` using fast hashing
///
/// # Returns
/// Quoted `ETag` string, e.g., `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Supports:
/// - Single `ETag`: `"abc123"`
/// - Multiple `ETags`: `"abc123", "def456"`
/// - Weak validators: `W/"abc123"`
/// - Wildcard: `*`
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag.split(',').any(|e| {
            let e = e.trim();
            e == "*" || e.strip_prefix("W/").unwrap_or(e) == etag
        })
    })
}

/// Format a timestamp as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn format_http_date(time: &DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value, `None` if malformed
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whether the resource is unchanged since the client's `If-Modified-Since`
///
/// Comparison is done at one-second granularity, the resolution of HTTP dates.
pub fn not_modified_since(if_modified_since: Option<&str>, last_modified: &DateTime<Utc>) -> bool {
    if_modified_since
        .and_then(parse_http_date)
        .is_some_and(|since| last_modified.timestamp() <= since.timestamp())
}

/// Decide whether a cached copy held by the client is still valid
///
/// `If-None-Match` takes precedence; `If-Modified-Since` is only consulted
/// when it is absent.
pub fn is_not_modified(
    if_none_match: Option<&str>,
    if_modified_since: Option<&str>,
    etag: &str,
    last_modified: Option<&DateTime<Utc>>,
) -> bool {
    if if_none_match.is_some() {
        return check_etag_match(if_none_match, etag);
    }
    last_modified.is_some_and(|lm| not_modified_since(if_modified_since, lm))
}

/// Whether a `Range` header may be applied given the client's `If-Range`
///
/// An absent `If-Range` always allows the range. Otherwise it must equal
/// the strong `ETag` or the exact `Last-Modified` date.
pub fn if_range_allows(
    if_range: Option<&str>,
    etag: &str,
    last_modified: Option<&DateTime<Utc>>,
) -> bool {
    let Some(value) = if_range.map(str::trim) else {
        return true;
    };
    if value.starts_with('"') {
        return value == etag;
    }
    match (parse_http_date(value), last_modified) {
        (Some(date), Some(lm)) => date.timestamp() == lm.timestamp(),
        _ => false,
    }
}

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache that never needs revalidation, max-age in seconds
    Immutable(u32),
    /// No store
    NoStore,
}

impl CachePolicy {
    /// Policy for fingerprinted build assets
    pub const ASSET: Self = Self::Immutable(IMMUTABLE_MAX_AGE);
    /// Policy for the application shell document
    pub const DOCUMENT: Self = Self::NoStore;

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Immutable(max_age) => format!("public, max-age={max_age}, immutable"),
            Self::NoStore => "no-store".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_etag() {
        let etag = generate_etag(b"hello world");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
        assert_eq!(etag, generate_etag(b"hello world"));
        assert_ne!(etag, generate_etag(b"hello there"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("W/\"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }

    #[test]
    fn test_http_date_format_and_parse() {
        let formatted = format_http_date(&sample_time());
        assert_eq!(formatted, "Fri, 01 Mar 2024 12:00:00 GMT");
        assert_eq!(parse_http_date(&formatted), Some(sample_time()));
        assert_eq!(parse_http_date("yesterday"), None);
    }

    #[test]
    fn test_not_modified_since() {
        let lm = sample_time();
        assert!(not_modified_since(Some("Fri, 01 Mar 2024 12:00:00 GMT"), &lm));
        assert!(not_modified_since(Some("Sat, 02 Mar 2024 00:00:00 GMT"), &lm));
        assert!(!not_modified_since(Some("Thu, 29 Feb 2024 00:00:00 GMT"), &lm));
        assert!(!not_modified_since(Some("garbage"), &lm));
        assert!(!not_modified_since(None, &lm));
    }

    #[test]
    fn test_if_none_match_takes_precedence() {
        let lm = sample_time();
        let later = "Sat, 02 Mar 2024 00:00:00 GMT";
        assert!(!is_not_modified(Some("\"other\""), Some(later), "\"e\"", Some(&lm)));
        assert!(is_not_modified(None, Some(later), "\"e\"", Some(&lm)));
        assert!(!is_not_modified(None, Some(later), "\"e\"", None));
    }

    #[test]
    fn test_if_range_allows() {
        let lm = sample_time();
        assert!(if_range_allows(None, "\"e\"", None));
        assert!(if_range_allows(Some("\"e\""), "\"e\"", None));
        assert!(!if_range_allows(Some("\"x\""), "\"e\"", None));
        assert!(if_range_allows(Some("Fri, 01 Mar 2024 12:00:00 GMT"), "\"e\"", Some(&lm)));
        assert!(!if_range_allows(Some("Fri, 01 Mar 2024 11:00:00 GMT"), "\"e\"", Some(&lm)));
    }

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::ASSET.to_header_value(),
            "public, max-age=31536000, immutable"
        );
        assert_eq!(CachePolicy::DOCUMENT.to_header_value(), "no-store");
        assert_eq!(
            CachePolicy::Immutable(60).to_header_value(),
            "public, max-age=60, immutable"
        );
    }
}
