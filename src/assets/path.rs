//! Request path normalization
//!
//! Lexical cleaning keeps every lookup inside the asset tree: `..` can never
//! climb above the root.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-decode a raw URI path, keeping the raw form if it is not UTF-8
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

/// Lexically clean a request path
///
/// Always returns a rooted path. `.` segments and empty segments are
/// dropped, `..` pops the previous segment (or nothing at the root) and a
/// trailing slash is removed.
///
/// # Examples
/// ```
/// use spa_server::assets::clean_path;
/// assert_eq!(clean_path("/a/./b/../c//d.js"), "/a/c/d.js");
/// assert_eq!(clean_path("/../../etc/passwd"), "/etc/passwd");
/// assert_eq!(clean_path(""), "/");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    format!("/{}", segments.join("/"))
}

/// Whether the final segment looks like a file name (contains a dot)
///
/// Paths that are not asset-shaped are application routes and always
/// receive the shell document.
pub fn is_asset_path(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|name| name.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/"), "/");
        assert_eq!(clean_path("/index.html"), "/index.html");
        assert_eq!(clean_path("/assets/"), "/assets");
        assert_eq!(clean_path("//assets///app.js"), "/assets/app.js");
        assert_eq!(clean_path("/a/./b/../c"), "/a/c");
        assert_eq!(clean_path("/.."), "/");
    }

    #[test]
    fn test_clean_path_blocks_traversal() {
        assert_eq!(clean_path("/../../../etc/passwd"), "/etc/passwd");
        assert_eq!(clean_path("/assets/../../secret.txt"), "/secret.txt");
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/my%20app.js"), "/my app.js");
        assert_eq!(decode_path("/plain"), "/plain");
        // Invalid UTF-8 keeps the raw form
        assert_eq!(decode_path("/bad%FF.js"), "/bad%FF.js");
    }

    #[test]
    fn test_is_asset_path() {
        assert!(is_asset_path("/app.js"));
        assert!(is_asset_path("/assets/logo.8f3a.png"));
        assert!(is_asset_path("/.hidden"));
        assert!(!is_asset_path("/"));
        assert!(!is_asset_path("/dashboard/42"));
        assert!(!is_asset_path("/v1.2/settings"));
    }
}
