//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → CLI overrides → Validate → Logging → Bind listener
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → Stop accepting → Drain connections → Exit
//! ```

pub mod signals;
