//! Baseline security headers, applied to every response

use super::{Middleware, Next};
use crate::http::HttpResponse;
use hyper::header::{
    HeaderName, HeaderValue, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY, X_CONTENT_TYPE_OPTIONS,
};
use hyper::http::request::Parts;

const HEADERS: [(HeaderName, &str); 3] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (
        STRICT_TRANSPORT_SECURITY,
        "max-age=63072000; includeSubDomains; preload",
    ),
];

/// Sets the fixed security header set regardless of path or status
#[derive(Debug, Default, Clone, Copy)]
pub struct SecurityHeaders;

impl Middleware for SecurityHeaders {
    fn handle(&self, req: &Parts, next: Next<'_>) -> HttpResponse {
        let mut resp = next.run(req);
        let headers = resp.headers_mut();
        for (name, value) in HEADERS {
            headers.insert(name, HeaderValue::from_static(value));
        }
        resp
    }
}
