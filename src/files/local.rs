//! Local filesystem file provider.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use tokio::runtime::Handle;

use crate::files::{FileError, FileProvider};

/// Serves files below a root directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalFileSystem {
    root: PathBuf,
    /// Runtime used for blocking reads; `tokio::fs` is used when unset.
    blocking_pool: Option<Handle>,
}

impl LocalFileSystem {
    /// Create a provider rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            blocking_pool: None,
        }
    }

    /// Run file reads as blocking tasks on the given runtime.
    pub fn with_blocking_pool(mut self, handle: Handle) -> Self {
        self.blocking_pool = Some(handle);
        self
    }

    /// The directory all lookups are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blocking_pool(&self) -> Option<&Handle> {
        self.blocking_pool.as_ref()
    }
}

impl FileProvider for LocalFileSystem {
    type Identifier = PathBuf;

    fn identifier_for(&self, path: &str) -> Option<PathBuf> {
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }

        let full_path = self.root.join(relative);
        match std::fs::metadata(&full_path) {
            Ok(metadata) if metadata.is_file() => Some(full_path),
            _ => None,
        }
    }

    async fn read(&self, id: &PathBuf) -> Result<Bytes, FileError> {
        let result = match &self.blocking_pool {
            Some(handle) => {
                let path = id.clone();
                handle
                    .spawn_blocking(move || std::fs::read(path))
                    .await
                    .map_err(|_| FileError::Aborted {
                        path: id.display().to_string(),
                    })?
            }
            None => tokio::fs::read(id).await,
        };

        result.map(Bytes::from).map_err(|source| FileError::Io {
            path: id.display().to_string(),
            source,
        })
    }
}
