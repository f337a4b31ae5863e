//! Documentation URI rewriting subsystem.
//!
//! # Data Flow
//! ```text
//! Raw request path (possibly percent-encoded)
//!     → filter.rs (decode, reject traversal, check URI root)
//!     → resource.rs (strip root, split archive name / relative path)
//!     → rules.rs (ordered rule table)
//!     → Return: Redirect, Serve or NoMatch
//! ```
//!
//! # Design Decisions
//! - Pure functions over strings: no I/O, no shared mutable state
//! - Rule tables are compile-time constants
//! - First matching rule wins, later rules are never evaluated
//! - Rejection is not an error: the request goes to the next handler

pub mod filter;
pub mod resource;
pub mod rules;

pub use filter::UriFilter;
pub use resource::Resource;
pub use rules::{dispatch, Action};
