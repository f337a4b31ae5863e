//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with a not-found fallback
//! - Wire up middleware (request ID, tracing, timeout, documentation archives)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, middleware, response::Response, Router};
use tokio::net::TcpListener;
use tokio::runtime::Handle;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{ConfigError, ServerConfig};
use crate::files::FileProvider;
use crate::http::middleware::{docc_middleware, DoccMiddleware};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::empty_response;
use crate::lifecycle::signals::shutdown_signal;

/// HTTP server hosting the documentation middleware.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server serving archives from the configured directory.
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let docc = Arc::new(DoccMiddleware::from_config(&config.docc)?);
        let router = Self::build_router(&config, docc);
        Ok(Self { router, config })
    }

    /// Like [`HttpServer::new`], reading archive files on a dedicated blocking pool.
    pub fn with_blocking_pool(config: ServerConfig, pool: Handle) -> Result<Self, ConfigError> {
        let docc = Arc::new(DoccMiddleware::from_config_with_pool(&config.docc, pool)?);
        let router = Self::build_router(&config, docc);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router<P: FileProvider>(
        config: &ServerConfig,
        docc: Arc<DoccMiddleware<P>>,
    ) -> Router {
        Router::new()
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(docc, docc_middleware::<P>))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer())
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// Run the server until Ctrl+C or SIGTERM.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run the server until `signal` completes.
    pub async fn run_until<S>(self, listener: TcpListener, signal: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            uri_root = %self.config.docc.uri_root,
            archive_root = %self.config.docc.archive_root,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router, for embedding or testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Requests no handler claimed.
async fn not_found() -> Response {
    empty_response(StatusCode::NOT_FOUND)
}
