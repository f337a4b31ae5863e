//! URI acceptance filter.
//!
//! # Responsibilities
//! - Percent-decode the raw request path
//! - Reject directory traversal attempts
//! - Reject paths outside the configured URI root
//!
//! # Design Decisions
//! - Malformed escapes and non UTF-8 paths are rejected, not repaired
//! - The traversal guard is a plain substring check on `..`
//! - A URI root with or without trailing slash accepts the same paths

use percent_encoding::percent_decode_str;

/// Token rejected anywhere in a decoded path.
const PARENT_FOLDER: &str = "..";

/// Decides whether a request path belongs to the documentation middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriFilter {
    /// URI root without trailing slash (`"/"` becomes `""`).
    uri_root: String,
}

impl UriFilter {
    /// Create a filter for the given URI root.
    pub fn new(uri_root: impl AsRef<str>) -> Self {
        Self {
            uri_root: normalize_root(uri_root.as_ref()),
        }
    }

    /// The normalized URI root, never ending with `/`.
    pub fn uri_root(&self) -> &str {
        &self.uri_root
    }

    /// Returns the decoded path if the request should be handled, `None` otherwise.
    pub fn accept(&self, raw_path: &str) -> Option<String> {
        let decoded = decode_path(raw_path)?;

        if decoded.contains(PARENT_FOLDER) || !self.is_under_root(&decoded) {
            return None;
        }

        Some(decoded)
    }

    fn is_under_root(&self, path: &str) -> bool {
        match path.strip_prefix(self.uri_root.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Strip trailing slashes so `/docs` and `/docs/` compare equal.
pub fn normalize_root(uri_root: &str) -> String {
    uri_root.trim_end_matches('/').to_string()
}

/// Percent-decode a path, failing on malformed escapes or invalid UTF-8.
pub fn decode_path(raw_path: &str) -> Option<String> {
    if !has_valid_escapes(raw_path) {
        return None;
    }

    percent_decode_str(raw_path)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn has_valid_escapes(raw_path: &str) -> bool {
    let bytes = raw_path.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] != b'%' {
            index += 1;
            continue;
        }
        match (bytes.get(index + 1), bytes.get(index + 2)) {
            (Some(high), Some(low)) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit() => {
                index += 3;
            }
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = "/some/root/path";

    #[test]
    fn test_accepts_plain_paths_under_root() {
        let filter = UriFilter::new(ROOT);

        assert_eq!(filter.accept(ROOT).as_deref(), Some(ROOT));
        assert_eq!(
            filter.accept("/some/root/path/").as_deref(),
            Some("/some/root/path/")
        );
        assert_eq!(
            filter.accept("/some/root/path/some/known/path").as_deref(),
            Some("/some/root/path/some/known/path")
        );
    }

    #[test]
    fn test_rejects_traversal() {
        let filter = UriFilter::new(ROOT);

        assert!(filter.accept("/some/root/path/some/../path").is_none());
        assert!(filter.accept("/some/root/path/some/%2E%2E/path").is_none());
        // Coarse guard: also hits legitimate names.
        assert!(filter.accept("/some/root/path/Archive/file..txt").is_none());
    }

    #[test]
    fn test_rejects_other_roots() {
        let filter = UriFilter::new(ROOT);

        assert!(filter.accept("some/other/root/some/known/path").is_none());
        assert!(filter.accept("some/other%2Froot/some%2Fknown%3Fpath").is_none());
        assert!(filter.accept("/some/root").is_none());
        assert!(filter.accept("/some/root/pathology/Archive").is_none());
    }

    #[test]
    fn test_decodes_percent_encoded_paths() {
        let filter = UriFilter::new(ROOT);

        assert_eq!(
            filter.accept("/some/root/path%2F").as_deref(),
            Some("/some/root/path/")
        );
        assert_eq!(
            filter.accept("/some/root/path/some%2Fknown%3Fpath").as_deref(),
            Some("/some/root/path/some/known?path")
        );
        assert_eq!(
            UriFilter::new("/docs").accept("%2Fdocs%2FArchive%2F").as_deref(),
            Some("/docs/Archive/")
        );
    }

    #[test]
    fn test_rejects_malformed_escapes() {
        let filter = UriFilter::new(ROOT);

        assert!(filter.accept("/some/root/path/%").is_none());
        assert!(filter.accept("/some/root/path/%E").is_none());
        assert!(filter.accept("/some/root/path/%ZZ").is_none());
        assert!(filter.accept("/some/root/path/%FF%FE").is_none());
    }

    #[test]
    fn test_trailing_slash_root_is_equivalent() {
        let plain = UriFilter::new("/docs");
        let slashed = UriFilter::new("/docs/");
        assert_eq!(plain, slashed);

        for path in ["/docs", "/docs/", "/docs/Archive", "/docsextra", "/other"] {
            assert_eq!(plain.accept(path), slashed.accept(path), "path {}", path);
        }
    }

    #[test]
    fn test_slash_root_accepts_everything_absolute() {
        let filter = UriFilter::new("/");

        assert_eq!(filter.uri_root(), "");
        assert_eq!(filter.accept("/Archive").as_deref(), Some("/Archive"));
        assert_eq!(filter.accept("/").as_deref(), Some("/"));
    }
}
