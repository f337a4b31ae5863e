//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the documentation server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (hostname, port).
    pub listener: ListenerConfig,

    /// Documentation archive middleware settings.
    pub docc: DoccConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Hostname or IP address to bind.
    pub hostname: String,

    /// Port to bind.
    pub port: u16,
}

impl ListenerConfig {
    /// `hostname:port`, suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            hostname: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Documentation archive middleware configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DoccConfig {
    /// URI prefix the archives are served under (e.g. "/archives").
    /// A trailing slash is optional.
    pub uri_root: String,

    /// Directory containing the `<Name>.doccarchive` bundles.
    pub archive_root: String,
}

impl DoccConfig {
    pub fn new(uri_root: impl Into<String>, archive_root: impl Into<String>) -> Self {
        Self {
            uri_root: uri_root.into(),
            archive_root: archive_root.into(),
        }
    }
}

impl Default for DoccConfig {
    fn default() -> Self {
        Self {
            uri_root: "/archives".to_string(),
            archive_root: "Archives".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
