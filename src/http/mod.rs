//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! fallback routing policy.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;

use hyper::body::Bytes;

/// Fully buffered response as produced by the middleware pipeline
pub type HttpResponse = hyper::Response<Bytes>;

// Re-export commonly used types
pub use range::parse_range_header;
pub use response::{
    build_304_response, build_404_response, build_405_response, build_416_response,
    build_asset_response, build_document_response, build_options_response,
    build_partial_response, AssetMeta,
};
