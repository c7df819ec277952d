//! SPA fallback policy
//!
//! Decides, per request, between the matched asset, the application shell
//! document and a not-found error:
//!
//! 1. `/` and `/index.html` serve the shell with `no-store`.
//! 2. Asset-shaped paths (final segment contains a dot) that exist in the
//!    tree are served as immutable assets with conditional and range support.
//! 3. Everything else, including asset-shaped paths missing from the tree,
//!    falls back to the shell so client-side routing can take over.
//! 4. Without a shell document the answer is a plain-text 404.

use crate::assets::{self, path::decode_path, Asset, AssetTree};
use crate::http::{self, cache, mime, range::RangeParseResult, AssetMeta, HttpResponse};
use crate::logger;
use crate::middleware::Endpoint;
use hyper::header::{HeaderMap, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, IF_RANGE, RANGE};
use hyper::http::request::Parts;
use hyper::Method;
use std::sync::Arc;

const ROOT_NOT_FOUND: &str = "index.html not found";

/// Endpoint serving the asset tree with shell-document fallback
pub struct SpaHandler {
    tree: Arc<AssetTree>,
}

/// Conditional and range headers relevant to asset responses
struct Preconditions<'a> {
    if_none_match: Option<&'a str>,
    if_modified_since: Option<&'a str>,
    if_range: Option<&'a str>,
    range: Option<&'a str>,
}

impl<'a> Preconditions<'a> {
    fn from_headers(headers: &'a HeaderMap) -> Self {
        let get = move |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
        Self {
            if_none_match: get(IF_NONE_MATCH),
            if_modified_since: get(IF_MODIFIED_SINCE),
            if_range: get(IF_RANGE),
            range: get(RANGE),
        }
    }
}

impl SpaHandler {
    pub const fn new(tree: Arc<AssetTree>) -> Self {
        Self { tree }
    }

    /// Apply the fallback policy to an already-cleaned path
    fn route(&self, path: &str, req: &Parts, is_head: bool) -> HttpResponse {
        if path == "/" || path == "/index.html" {
            return self.serve_root_document(is_head);
        }

        if assets::is_asset_path(path) {
            if let Some(asset) = self.tree.open(path) {
                let pre = Preconditions::from_headers(&req.headers);
                return serve_asset(path, asset, &pre, is_head);
            }
        }

        self.serve_root_document(is_head)
    }

    fn serve_root_document(&self, is_head: bool) -> HttpResponse {
        match self.tree.root_document() {
            Some(doc) => http::build_document_response(doc.data.clone(), is_head),
            None => {
                logger::log_error("Root document index.html is missing from the asset bundle");
                http::build_404_response(ROOT_NOT_FOUND)
            }
        }
    }
}

impl Endpoint for SpaHandler {
    fn call(&self, req: &Parts) -> HttpResponse {
        // Without a shell every request is a 404, whatever its method
        let served = matches!(req.method, Method::GET | Method::HEAD);
        if !served && self.tree.root_document().is_none() {
            return self.serve_root_document(false);
        }

        let is_head = match req.method {
            Method::GET => false,
            Method::HEAD => true,
            Method::OPTIONS => return http::build_options_response(),
            _ => {
                logger::log_warning(&format!("Method not allowed: {}", req.method));
                return http::build_405_response();
            }
        };

        let path = assets::clean_path(&decode_path(req.uri.path()));
        logger::log_request_path(&path);

        self.route(&path, req, is_head)
    }
}

/// Serve a bundled asset with `ETag`/`Last-Modified` validation and ranges
fn serve_asset(
    path: &str,
    asset: &Asset,
    pre: &Preconditions<'_>,
    is_head: bool,
) -> HttpResponse {
    let meta = AssetMeta::new(
        &asset.etag,
        mime::content_type_for_path(path),
        asset.last_modified,
    );

    if cache::is_not_modified(
        pre.if_none_match,
        pre.if_modified_since,
        meta.etag,
        meta.last_modified.as_ref(),
    ) {
        return http::build_304_response(&meta);
    }

    let range = if cache::if_range_allows(pre.if_range, meta.etag, meta.last_modified.as_ref()) {
        pre.range
    } else {
        None
    };

    match http::parse_range_header(range, asset.data.len()) {
        RangeParseResult::Valid(range) => {
            http::build_partial_response(&asset.data, range, &meta, is_head)
        }
        RangeParseResult::NotSatisfiable => http::build_416_response(asset.data.len()),
        RangeParseResult::None => http::build_asset_response(asset.data.clone(), &meta, is_head),
    }
}
