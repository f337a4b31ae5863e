//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Redirect / serve actions produce:
//!     → events.rs (request events through an injected EventSink)
//!     → metrics.rs (outcome counters)
//!
//! Consumers:
//!     → logging.rs (tracing subscriber, stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Middleware logs through an injected EventSink, not a global logger
//! - The default sink forwards to `tracing`
//! - Request ID flows into every event

pub mod events;
pub mod logging;
pub mod metrics;

pub use events::{EventSink, RecordingSink, RequestEvent, TracingSink};
