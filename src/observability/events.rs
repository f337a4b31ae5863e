//! Structured request events.

use std::sync::{Mutex, PoisonError};

use axum::http::StatusCode;
use tracing::Level;

use crate::http::request::RequestContext;

/// Key-value payload describing what the middleware did with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEvent {
    pub request_id: String,
    pub method: String,
    pub path: String,
    pub status: u16,
    /// Redirect destination, for redirects.
    pub redirect: Option<String>,
    /// Physical lookup key, for served or missing resources.
    pub resource: Option<String>,
    /// Body length, for served resources.
    pub bytes: Option<usize>,
    pub message: String,
}

impl RequestEvent {
    pub fn new(context: &RequestContext, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            request_id: context.id.clone(),
            method: context.method.to_string(),
            path: context.path.clone(),
            status: status.as_u16(),
            redirect: None,
            resource: None,
            bytes: None,
            message: message.into(),
        }
    }

    pub fn with_redirect(mut self, destination: impl Into<String>) -> Self {
        self.redirect = Some(destination.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_bytes(mut self, bytes: usize) -> Self {
        self.bytes = Some(bytes);
        self
    }
}

/// Destination for request events, one method per severity.
pub trait EventSink: Send + Sync {
    fn debug(&self, event: RequestEvent);
    fn error(&self, event: RequestEvent);
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn debug(&self, event: RequestEvent) {
        tracing::debug!(
            target: "docc_proxy::middleware",
            request_id = %event.request_id,
            method = %event.method,
            path = %event.path,
            status = event.status,
            redirect = event.redirect.as_deref(),
            resource = event.resource.as_deref(),
            bytes = event.bytes,
            "{}",
            event.message
        );
    }

    fn error(&self, event: RequestEvent) {
        tracing::error!(
            target: "docc_proxy::middleware",
            request_id = %event.request_id,
            method = %event.method,
            path = %event.path,
            status = event.status,
            redirect = event.redirect.as_deref(),
            resource = event.resource.as_deref(),
            bytes = event.bytes,
            "{}",
            event.message
        );
    }
}

/// Keeps events in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(Level, RequestEvent)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events in emission order.
    pub fn entries(&self) -> Vec<(Level, RequestEvent)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, level: Level, event: RequestEvent) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, event));
    }
}

impl EventSink for RecordingSink {
    fn debug(&self, event: RequestEvent) {
        self.record(Level::DEBUG, event);
    }

    fn error(&self, event: RequestEvent) {
        self.record(Level::ERROR, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn context() -> RequestContext {
        RequestContext {
            id: "req-1".to_string(),
            method: Method::GET,
            path: "/docs/Archive".to_string(),
        }
    }

    #[test]
    fn test_event_builder() {
        let event = RequestEvent::new(&context(), StatusCode::OK, "served")
            .with_resource("/Archive.doccarchive/favicon.ico")
            .with_bytes(42);

        assert_eq!(event.request_id, "req-1");
        assert_eq!(event.method, "GET");
        assert_eq!(event.path, "/docs/Archive");
        assert_eq!(event.status, 200);
        assert_eq!(event.redirect, None);
        assert_eq!(event.resource.as_deref(), Some("/Archive.doccarchive/favicon.ico"));
        assert_eq!(event.bytes, Some(42));
    }

    #[test]
    fn test_recording_sink_keeps_order_and_level() {
        let sink = RecordingSink::new();
        sink.debug(RequestEvent::new(&context(), StatusCode::MOVED_PERMANENTLY, "first"));
        sink.error(RequestEvent::new(&context(), StatusCode::NOT_FOUND, "second"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, Level::DEBUG);
        assert_eq!(entries[0].1.message, "first");
        assert_eq!(entries[1].0, Level::ERROR);
        assert_eq!(entries[1].1.status, 404);
    }
}
