//! Compile-time asset bundle
//!
//! The frontend build output in `dist/` is embedded into the binary.

use super::{Asset, AssetError, AssetTree};
use chrono::DateTime;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "dist/"]
pub struct Dist;

/// Copy every embedded file into a fresh `AssetTree`
pub fn load() -> Result<AssetTree, AssetError> {
    let mut entries = Vec::new();

    for name in Dist::iter() {
        let file = Dist::get(&name).ok_or_else(|| AssetError::Unreadable(name.to_string()))?;
        let last_modified = file
            .metadata
            .last_modified()
            .and_then(|secs| i64::try_from(secs).ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        entries.push((name.into_owned(), Asset::new(file.data.into_owned(), last_modified)));
    }

    if entries.is_empty() {
        return Err(AssetError::EmptyBundle);
    }

    Ok(AssetTree::from_entries(entries))
}
