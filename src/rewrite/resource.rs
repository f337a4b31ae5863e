//! Request path decomposition.
//!
//! A [`Resource`] is built once per request from the decoded path: the first
//! segment after the URI root names the documentation archive, the rest is
//! the path relative to that archive.

use std::borrow::Cow;

/// Archive bundle extension appended to the archive name on disk.
const ARCHIVE_EXTENSION: &str = ".doccarchive";

/// Decomposed documentation request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    archive_name: String,
    relative_path: String,
}

impl Resource {
    /// Create a resource from its parts.
    pub fn new(archive_name: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            archive_name: archive_name.into(),
            relative_path: relative_path.into(),
        }
    }

    /// The resource naming the URI root itself, with no archive.
    pub fn root() -> Self {
        Self::new("", "/")
    }

    /// Split a decoded path into archive name and relative path.
    ///
    /// Returns `None` when `decoded_path` does not extend `uri_root`, or when
    /// the archive segment is not directly behind the root.
    pub fn decompose(decoded_path: &str, uri_root: &str) -> Option<Self> {
        let rest = decoded_path.strip_prefix(uri_root)?;
        if rest.is_empty() {
            return Some(Self::root());
        }

        let rest: Cow<'_, str> = if rest.starts_with('/') {
            Cow::Borrowed(rest)
        } else {
            Cow::Owned(format!("/{rest}"))
        };

        let Some(archive_name) = rest.split('/').find(|segment| !segment.is_empty()) else {
            return Some(Self::root());
        };

        let relative_path = rest
            .strip_prefix('/')
            .and_then(|tail| tail.strip_prefix(archive_name))?;

        Some(Self::new(archive_name, relative_path))
    }

    /// First path segment after the URI root; empty for the root itself.
    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Path after the archive name: empty or starting with `/`.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Lowercased archive name, as used inside the generated archive.
    pub fn archive_reference(&self) -> String {
        self.archive_name.to_lowercase()
    }

    /// Location of the archive bundle below the archive directory.
    pub fn archive_path(&self) -> String {
        format!("/{}{}", self.archive_name, ARCHIVE_EXTENSION)
    }

    /// True when the path names the URI root rather than an archive.
    pub fn is_root(&self) -> bool {
        self.archive_name.is_empty()
    }
}
