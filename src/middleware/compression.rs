//! gzip response compression
//!
//! Compression is best effort: a missing or unreadable `Accept-Encoding`
//! means "identity", and an encoder failure returns the original response.

use super::{Middleware, Next};
use crate::http::HttpResponse;
use crate::logger;
use flate2::write::GzEncoder;
use flate2::Compression;
use hyper::body::Bytes;
use hyper::header::{
    HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_RANGE, ETAG,
    VARY,
};
use hyper::http::request::Parts;
use hyper::{Method, StatusCode};
use std::io::{self, Write};

/// Compresses response bodies for clients advertising gzip support
#[derive(Debug, Clone, Copy)]
pub struct CompressionLayer {
    level: Compression,
}

impl CompressionLayer {
    /// Create a layer with the given gzip level (clamped to 0..=9)
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for CompressionLayer {
    fn default() -> Self {
        Self {
            level: Compression::default(),
        }
    }
}

impl Middleware for CompressionLayer {
    fn handle(&self, req: &Parts, next: Next<'_>) -> HttpResponse {
        let accepts = accepts_gzip(req.headers.get(ACCEPT_ENCODING));
        let mut resp = next.run(req);

        append_vary(resp.headers_mut());

        if !accepts {
            return resp;
        }

        // A revalidated gzip copy must keep the validator it was served with
        if resp.status() == StatusCode::NOT_MODIFIED {
            weaken_etag(resp.headers_mut());
            return resp;
        }

        if !should_encode(&resp) {
            return resp;
        }

        if req.method == Method::HEAD {
            mark_encoded(resp.headers_mut());
            return resp;
        }

        match gzip(resp.body(), self.level) {
            Ok(compressed) => {
                mark_encoded(resp.headers_mut());
                *resp.body_mut() = compressed;
                resp
            }
            Err(e) => {
                logger::log_warning(&format!("gzip encoding failed, sending identity: {e}"));
                resp
            }
        }
    }
}

/// Whether an `Accept-Encoding` value lists gzip with a non-zero quality
///
/// # Examples
/// ```
/// use hyper::header::HeaderValue;
/// use spa_server::middleware::compression::accepts_gzip;
/// assert!(accepts_gzip(Some(&HeaderValue::from_static("br, gzip;q=0.8"))));
/// assert!(!accepts_gzip(Some(&HeaderValue::from_static("gzip;q=0"))));
/// assert!(!accepts_gzip(None));
/// ```
pub fn accepts_gzip(header: Option<&HeaderValue>) -> bool {
    let Some(value) = header.and_then(|v| v.to_str().ok()) else {
        return false;
    };

    value.split(',').any(|item| {
        let mut params = item.split(';');
        let coding = params.next().unwrap_or_default().trim();
        (coding.eq_ignore_ascii_case("gzip") || coding.eq_ignore_ascii_case("x-gzip"))
            && !params.any(is_zero_quality)
    })
}

fn is_zero_quality(param: &str) -> bool {
    param.split_once('=').is_some_and(|(key, value)| {
        key.trim().eq_ignore_ascii_case("q")
            && value.trim().parse::<f32>().is_ok_and(|q| q <= 0.0)
    })
}

/// Add `Accept-Encoding` to `Vary` unless it is already listed
fn append_vary(headers: &mut HeaderMap) {
    let listed = headers.get_all(VARY).iter().any(|v| {
        v.to_str().is_ok_and(|s| {
            s.split(',')
                .any(|t| t.trim() == "*" || t.trim().eq_ignore_ascii_case("accept-encoding"))
        })
    });
    if !listed {
        headers.append(VARY, HeaderValue::from_static("Accept-Encoding"));
    }
}

/// Switch headers over to the gzip representation
fn mark_encoded(headers: &mut HeaderMap) {
    headers.remove(CONTENT_LENGTH);
    headers.insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
    weaken_etag(headers);
}

/// Turn a strong `ETag` into a weak one
///
/// The identity and gzip bodies differ byte for byte, so they cannot share a
/// strong validator. A weak tag still matches `If-None-Match` but never
/// satisfies `If-Range`, so a resumed download restarts from a full 200.
fn weaken_etag(headers: &mut HeaderMap) {
    let weak = headers
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.starts_with("W/"))
        .and_then(|v| HeaderValue::from_str(&format!("W/{v}")).ok());
    if let Some(weak) = weak {
        headers.insert(ETAG, weak);
    }
}

/// Already-encoded, partial and bodiless responses are passed through
fn should_encode(resp: &HttpResponse) -> bool {
    let status = resp.status();
    let headers = resp.headers();
    status != StatusCode::NOT_MODIFIED
        && status != StatusCode::NO_CONTENT
        && !headers.contains_key(CONTENT_ENCODING)
        && !headers.contains_key(CONTENT_RANGE)
}

/// gzip a complete body
///
/// The encoder lives only inside this call and `finish` consumes it, so the
/// trailer is written exactly once on the success path. An early return on
/// a write error drops the encoder without producing output.
fn gzip(data: &[u8], level: Compression) -> io::Result<Bytes> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 2 + 32), level);
    encoder.write_all(data)?;
    encoder.finish().map(Bytes::from)
}
