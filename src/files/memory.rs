//! In-memory file provider.

use std::collections::HashMap;

use axum::body::Bytes;

use crate::files::{FileError, FileProvider};

/// Serves files from a fixed map of paths to contents.
///
/// Paths are matched exactly, including the leading `/`.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<String, Bytes>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, replacing any previous contents at `path`.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileProvider for MemoryFileSystem {
    type Identifier = String;

    fn identifier_for(&self, path: &str) -> Option<String> {
        self.files.contains_key(path).then(|| path.to_string())
    }

    async fn read(&self, id: &String) -> Result<Bytes, FileError> {
        self.files.get(id).cloned().ok_or_else(|| FileError::Io {
            path: id.clone(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
