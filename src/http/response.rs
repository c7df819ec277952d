//! HTTP response building module
//!
//! Builders for every response the server emits. Bodies are plain `Bytes`
//! so middleware can inspect and re-encode them; the connection layer wraps
//! them in `Full` when handing them to hyper.

use super::cache::{self, CachePolicy};
use super::range::ByteRange;
use super::HttpResponse;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use hyper::header::{
    ACCEPT_RANGES, ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
    LAST_MODIFIED,
};
use hyper::{Response, StatusCode};

const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Validators and type information shared by all responses for one asset
#[derive(Debug, Clone)]
pub struct AssetMeta<'a> {
    pub content_type: &'a str,
    pub etag: &'a str,
    pub last_modified: Option<DateTime<Utc>>,
}

impl<'a> AssetMeta<'a> {
    pub const fn new(
        etag: &'a str,
        content_type: &'a str,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            content_type,
            etag,
            last_modified,
        }
    }
}

/// Build 200 response for the application shell document
pub fn build_document_response(data: Bytes, is_head: bool) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8")
        .header(CONTENT_LENGTH, content_length)
        .header(CACHE_CONTROL, CachePolicy::DOCUMENT.to_header_value())
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("document", &e);
            Response::new(Bytes::new())
        })
}

/// Build 200 response for a bundled asset
pub fn build_asset_response(data: Bytes, meta: &AssetMeta<'_>, is_head: bool) -> HttpResponse {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, meta.content_type)
        .header(CONTENT_LENGTH, content_length)
        .header(ACCEPT_RANGES, "bytes")
        .header(ETAG, meta.etag)
        .header(CACHE_CONTROL, CachePolicy::ASSET.to_header_value());
    if let Some(lm) = &meta.last_modified {
        builder = builder.header(LAST_MODIFIED, cache::format_http_date(lm));
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Bytes::new())
    })
}

/// Build 206 Partial Content response
pub fn build_partial_response(
    data: &Bytes,
    range: ByteRange,
    meta: &AssetMeta<'_>,
    is_head: bool,
) -> HttpResponse {
    let body = if is_head {
        Bytes::new()
    } else {
        data.slice(range.as_range())
    };

    let mut builder = Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(CONTENT_TYPE, meta.content_type)
        .header(CONTENT_LENGTH, range.len())
        .header(CONTENT_RANGE, range.content_range(data.len()))
        .header(ACCEPT_RANGES, "bytes")
        .header(ETAG, meta.etag)
        .header(CACHE_CONTROL, CachePolicy::ASSET.to_header_value());
    if let Some(lm) = &meta.last_modified {
        builder = builder.header(LAST_MODIFIED, cache::format_http_date(lm));
    }

    builder.body(body).unwrap_or_else(|e| {
        log_build_error("206", &e);
        Response::new(Bytes::new())
    })
}

/// Build 304 Not Modified response
pub fn build_304_response(meta: &AssetMeta<'_>) -> HttpResponse {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header(ETAG, meta.etag)
        .header(CACHE_CONTROL, CachePolicy::ASSET.to_header_value());
    if let Some(lm) = &meta.last_modified {
        builder = builder.header(LAST_MODIFIED, cache::format_http_date(lm));
    }

    builder.body(Bytes::new()).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(Bytes::new())
    })
}

/// Build 404 Not Found response with a plain-text message
pub fn build_404_response(message: &'static str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_LENGTH, message.len())
        .body(Bytes::from_static(message.as_bytes()))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Bytes::from_static(message.as_bytes()))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> HttpResponse {
    let message = "405 Method Not Allowed";
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(ALLOW, ALLOWED_METHODS)
        .body(Bytes::from_static(message.as_bytes()))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Bytes::from_static(message.as_bytes()))
        })
}

/// Build OPTIONS response
pub fn build_options_response() -> HttpResponse {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, ALLOWED_METHODS)
        .body(Bytes::new())
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Bytes::new())
        })
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: usize) -> HttpResponse {
    let message = "416 Range Not Satisfiable";
    Response::builder()
        .status(StatusCode::RANGE_NOT_SATISFIABLE)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(CONTENT_RANGE, format!("bytes */{file_size}"))
        .body(Bytes::from_static(message.as_bytes()))
        .unwrap_or_else(|e| {
            log_build_error("416", &e);
            Response::new(Bytes::from_static(message.as_bytes()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
