//! Documentation archive middleware.
//!
//! # Data Flow
//! ```text
//! Request
//!     → docc.rs (filter, decompose, dispatch)
//!     ├─ NoMatch  → next handler, response untouched
//!     ├─ Redirect → redirect.rs (301 + Location)
//!     └─ Serve    → serve.rs (file provider lookup + read)
//! ```

pub mod docc;
pub mod redirect;
pub mod serve;

pub use docc::{docc_middleware, DoccError, DoccMiddleware};
