//! Request entry point
//!
//! Converts hyper requests into pipeline input, runs the middleware chain
//! and writes the access log line.

use crate::app::AppState;
use crate::http::HttpResponse;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// The request body is never read: only GET and HEAD are served.
pub fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();

    let response = state.pipeline.handle(&parts);
    log_access(&parts, &response, peer_addr, started);

    Ok(response.map(Full::new))
}

fn log_access(parts: &Parts, response: &HttpResponse, peer_addr: SocketAddr, started: Instant) {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        parts.method.to_string(),
        parts.uri.path().to_string(),
    );
    entry.query = parts.uri.query().map(ToString::to_string);
    entry.http_version = format_version(parts.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response.body().len();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry);
}

fn format_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_version() {
        assert_eq!(format_version(hyper::Version::HTTP_10), "1.0");
        assert_eq!(format_version(hyper::Version::HTTP_11), "1.1");
        assert_eq!(format_version(hyper::Version::HTTP_2), "2");
    }
}
