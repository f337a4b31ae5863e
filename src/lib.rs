//! DocC archive middleware library.
//!
//! Serves `.doccarchive` documentation bundles from inside an Axum
//! application: requests under a URI root are redirected to their canonical
//! form or answered with files from the archive directory, everything else
//! passes through untouched.

pub mod config;
pub mod files;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rewrite;

pub use config::{DoccConfig, ServerConfig};
pub use files::{FileProvider, LocalFileSystem, MemoryFileSystem};
pub use http::{docc_middleware, DoccError, DoccMiddleware, HttpServer};
