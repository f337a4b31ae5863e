//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docc_requests_total` (counter): requests by outcome
//! - `docc_served_bytes_total` (counter): body bytes of served resources
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "docc_requests_total";
pub const SERVED_BYTES_TOTAL: &str = "docc_served_bytes_total";

/// What the middleware did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redirect,
    Served,
    NotFound,
    ReadError,
    Passthrough,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Redirect => "redirect",
            Outcome::Served => "served",
            Outcome::NotFound => "not_found",
            Outcome::ReadError => "read_error",
            Outcome::Passthrough => "passthrough",
        }
    }
}

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

pub fn record_outcome(outcome: Outcome) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_served_bytes(bytes: usize) {
    counter!(SERVED_BYTES_TOTAL).increment(bytes as u64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Redirect.as_str(), "redirect");
        assert_eq!(Outcome::Served.as_str(), "served");
        assert_eq!(Outcome::NotFound.as_str(), "not_found");
        assert_eq!(Outcome::ReadError.as_str(), "read_error");
        assert_eq!(Outcome::Passthrough.as_str(), "passthrough");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_outcome(Outcome::Served);
        record_served_bytes(128);
    }
}
