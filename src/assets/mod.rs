//! Asset tree module
//!
//! Holds the bundled frontend build (`dist/`) as an immutable in-memory map
//! and resolves request paths against it.

mod bundle;
pub mod path;

use crate::http::cache;
use chrono::{DateTime, Utc};
use hyper::body::Bytes;
use std::collections::HashMap;
use std::fmt;

pub use bundle::Dist;
pub use path::{clean_path, is_asset_path};

/// Relative path of the application shell document
pub const ROOT_DOCUMENT: &str = "index.html";

/// A single bundled file
#[derive(Debug, Clone)]
pub struct Asset {
    /// File content
    pub data: Bytes,
    /// Strong validator computed from `data` when the asset is loaded
    pub etag: String,
    /// Modification time recorded by the bundle, if any
    pub last_modified: Option<DateTime<Utc>>,
}

impl Asset {
    pub fn new(data: impl Into<Bytes>, last_modified: Option<DateTime<Utc>>) -> Self {
        let data = data.into();
        Self {
            etag: cache::generate_etag(&data),
            data,
            last_modified,
        }
    }
}

/// Errors raised while mounting the asset tree
#[derive(Debug)]
pub enum AssetError {
    /// The bundle contains no files at all
    EmptyBundle,
    /// A bundled file was listed but could not be read back
    Unreadable(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBundle => write!(f, "asset bundle is empty"),
            Self::Unreadable(path) => write!(f, "bundled asset '{path}' could not be read"),
        }
    }
}

impl std::error::Error for AssetError {}

/// Immutable mapping from relative path (no leading slash) to asset
///
/// Built once at startup and shared read-only between all connections.
#[derive(Debug, Default)]
pub struct AssetTree {
    files: HashMap<String, Asset>,
}

impl AssetTree {
    /// Mount the tree from the compile-time bundle
    pub fn from_embedded() -> Result<Self, AssetError> {
        bundle::load()
    }

    /// Build a tree from explicit entries
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, Asset)>,
        P: Into<String>,
    {
        let files = entries
            .into_iter()
            .map(|(path, asset)| (path.into().trim_start_matches('/').to_string(), asset))
            .collect();
        Self { files }
    }

    /// Look up an already-cleaned request path (leading slash allowed)
    pub fn open(&self, path: &str) -> Option<&Asset> {
        self.files.get(path.trim_start_matches('/'))
    }

    /// The application shell document, if bundled
    pub fn root_document(&self) -> Option<&Asset> {
        self.files.get(ROOT_DOCUMENT)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
