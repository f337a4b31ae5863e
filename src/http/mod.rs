//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID, per-request context)
//!     → middleware/ (documentation archive rewrite: redirect, serve or pass)
//!     → response.rs (empty and file responses)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use middleware::{docc_middleware, DoccError, DoccMiddleware};
pub use request::{RequestContext, X_REQUEST_ID};
pub use server::HttpServer;
