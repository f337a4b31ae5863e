//! Documentation archive middleware.
//!
//! Intercepts requests under the configured URI root and either redirects
//! them to their canonical form or serves the matching file from a
//! `.doccarchive` bundle. Everything else goes to the next handler.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio::runtime::Handle;

use crate::config::{validate_docc, ConfigError, DoccConfig};
use crate::files::{FileError, FileProvider, LocalFileSystem};
use crate::http::middleware::{redirect::redirect, serve::serve};
use crate::http::request::RequestContext;
use crate::http::response::empty_response;
use crate::observability::events::{EventSink, TracingSink};
use crate::observability::metrics::{self, Outcome};
use crate::rewrite::{dispatch, Action, Resource, UriFilter};

/// Failure surfaced to the host framework.
#[derive(Debug, Error)]
pub enum DoccError {
    /// A file was found but could not be read.
    #[error("failed to load resource {resource}")]
    Read {
        resource: String,
        #[source]
        source: FileError,
    },
}

impl IntoResponse for DoccError {
    fn into_response(self) -> Response {
        tracing::error!(
            error = %self,
            cause = ?std::error::Error::source(&self),
            "Documentation request failed"
        );
        empty_response(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Rewrites documentation URIs and serves archive files.
pub struct DoccMiddleware<P> {
    filter: UriFilter,
    provider: P,
    sink: Arc<dyn EventSink>,
}

impl DoccMiddleware<LocalFileSystem> {
    /// Middleware serving archives from `config.archive_root` on disk.
    pub fn from_config(config: &DoccConfig) -> Result<Self, ConfigError> {
        Self::new(config, LocalFileSystem::new(&config.archive_root))
    }

    /// Like [`DoccMiddleware::from_config`], reading files as blocking tasks on `pool`.
    pub fn from_config_with_pool(config: &DoccConfig, pool: Handle) -> Result<Self, ConfigError> {
        let provider = LocalFileSystem::new(&config.archive_root).with_blocking_pool(pool);
        Self::new(config, provider)
    }
}

impl<P: FileProvider> DoccMiddleware<P> {
    /// Middleware over an arbitrary file provider.
    pub fn new(config: &DoccConfig, provider: P) -> Result<Self, ConfigError> {
        validate_docc(config).map_err(ConfigError::Validation)?;

        Ok(Self {
            filter: UriFilter::new(&config.uri_root),
            provider,
            sink: Arc::new(TracingSink),
        })
    }

    /// Replace the event sink (defaults to [`TracingSink`]).
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The normalized URI root.
    pub fn uri_root(&self) -> &str {
        self.filter.uri_root()
    }

    /// The file provider archive lookups go through.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Decide what to do with a raw request path, without any I/O.
    pub fn resolve(&self, raw_path: &str) -> Action {
        let Some(path) = self.filter.accept(raw_path) else {
            return Action::NoMatch;
        };
        let Some(resource) = Resource::decompose(&path, self.filter.uri_root()) else {
            return Action::NoMatch;
        };

        dispatch(&resource, &path)
    }

    /// Handle a request, calling `next` for anything that is not ours.
    pub async fn handle<F, Fut>(&self, request: Request, next: F) -> Result<Response, DoccError>
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        match self.resolve(request.uri().path()) {
            Action::NoMatch => {
                metrics::record_outcome(Outcome::Passthrough);
                Ok(next(request).await)
            }
            Action::Redirect { to } => {
                let context = RequestContext::from_request(&request);
                Ok(redirect(&to, &context, self.sink.as_ref()))
            }
            Action::Serve {
                relative,
                archive_path,
            } => {
                let context = RequestContext::from_request(&request);
                serve(
                    &relative,
                    &archive_path,
                    &context,
                    &self.provider,
                    self.sink.as_ref(),
                )
                .await
            }
        }
    }
}

/// Axum adapter, for use with `axum::middleware::from_fn_with_state`.
pub async fn docc_middleware<P: FileProvider>(
    State(docc): State<Arc<DoccMiddleware<P>>>,
    request: Request,
    next: Next,
) -> Result<Response, DoccError> {
    docc.handle(request, |request| next.run(request)).await
}
