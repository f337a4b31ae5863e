//! DocC archive server.
//!
//! Sample executable hosting the documentation middleware.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ request id ─▶ trace ─▶ timeout ─▶ docc middleware
//!                                                        │
//!                        ┌───────────────────────────────┼──────────────────┐
//!                        ▼                               ▼                  ▼
//!                 301 redirect                  file from archive     fallback 404
//!                 (canonical URI)               (<Name>.doccarchive)  (not ours)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use docc_proxy::config::{read_config, validate_config, ConfigError, ServerConfig};
use docc_proxy::observability::{logging, metrics};
use docc_proxy::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "docc-proxy")]
#[command(about = "Serve DocC documentation archives under a URI root", long_about = None)]
struct Cli {
    /// Hostname or address to listen on.
    #[arg(long)]
    hostname: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URI prefix the archives are served under.
    #[arg(long)]
    uri_root: Option<String>,

    /// Directory containing the .doccarchive bundles.
    #[arg(long)]
    archive_root: Option<String>,
}

impl Cli {
    /// Configuration file (or defaults) with command line overrides, validated once.
    fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => ServerConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Command line values take precedence over the configuration file.
    fn apply(self, config: &mut ServerConfig) {
        if let Some(hostname) = self.hostname {
            config.listener.hostname = hostname;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }
        if let Some(uri_root) = self.uri_root {
            config.docc.uri_root = uri_root;
        }
        if let Some(archive_root) = self.archive_root {
            config.docc.archive_root = archive_root;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level)?;
    tracing::info!("docc-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
