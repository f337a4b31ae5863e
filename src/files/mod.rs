//! File provider capability.
//!
//! # Data Flow
//! ```text
//! Serve action
//!     → identifier_for(path)   synchronous lookup, None = 404
//!     → read(identifier)       asynchronous, may fail
//!     → bytes for the response body
//! ```
//!
//! # Design Decisions
//! - The middleware never touches the filesystem directly
//! - Lookup and read are separate so a missing file is not an error
//! - Read failures are surfaced once, never retried

pub mod local;
pub mod memory;

use std::future::Future;

use axum::body::Bytes;
use thiserror::Error;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

/// Error type for file reads.
#[derive(Debug, Error)]
pub enum FileError {
    /// The underlying read failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The blocking task running the read was cancelled or panicked.
    #[error("read of {path} did not complete")]
    Aborted { path: String },
}

/// Lookup and read access to the files backing documentation archives.
pub trait FileProvider: Send + Sync + 'static {
    /// Handle for a file known to exist.
    type Identifier: Send + Sync;

    /// Look up a path relative to the provider root.
    fn identifier_for(&self, path: &str) -> Option<Self::Identifier>;

    /// Load the full contents of a previously looked up file.
    fn read(&self, id: &Self::Identifier) -> impl Future<Output = Result<Bytes, FileError>> + Send;
}
