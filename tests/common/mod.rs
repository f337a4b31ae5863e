//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{middleware, Router};
use tower::ServiceExt;

use docc_proxy::files::{FileError, FileProvider};
use docc_proxy::observability::RecordingSink;
use docc_proxy::{docc_middleware, DoccConfig, DoccMiddleware, MemoryFileSystem};

/// Status returned by the handler behind the middleware.
pub const NEXT_STATUS: StatusCode = StatusCode::IM_A_TEAPOT;

/// Body returned by the handler behind the middleware.
pub const NEXT_BODY: &str = "next handler";

/// A documentation archive named `SomeDocument` with every asset kind.
pub fn sample_archive() -> MemoryFileSystem {
    [
        "/SomeDocument.doccarchive/documentation/somedocument/index.html",
        "/SomeDocument.doccarchive/tutorials/somedocument/index.html",
        "/SomeDocument.doccarchive/data/documentation/somedocument.json",
        "/SomeDocument.doccarchive/favicon.ico",
        "/SomeDocument.doccarchive/favicon.svg",
        "/SomeDocument.doccarchive/theme-settings.json",
        "/SomeDocument.doccarchive/css/file.css",
        "/SomeDocument.doccarchive/data/data.bin",
        "/SomeDocument.doccarchive/downloads/file.txt",
        "/SomeDocument.doccarchive/images/image.png",
        "/SomeDocument.doccarchive/img/image.jpg",
        "/SomeDocument.doccarchive/index/file",
        "/SomeDocument.doccarchive/js/file.js",
        "/SomeDocument.doccarchive/videos/video.mp4",
        "/SomeDocument.doccarchive/videos/intro.mov",
    ]
    .into_iter()
    .fold(MemoryFileSystem::new(), |files, path| {
        files.with_file(path, format!("contents of {path}"))
    })
}

/// Router with the middleware in front of a handler answering [`NEXT_STATUS`].
pub fn app<P: FileProvider>(uri_root: &str, provider: P) -> (Router, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let docc = DoccMiddleware::new(&DoccConfig::new(uri_root, "unused"), provider)
        .expect("valid config")
        .with_sink(sink.clone());

    let router = Router::new()
        .fallback(|| async { (NEXT_STATUS, NEXT_BODY).into_response() })
        .layer(middleware::from_fn_with_state(
            Arc::new(docc),
            docc_middleware::<P>,
        ));

    (router, sink)
}

/// Send a GET request through the router.
pub async fn get(router: &Router, path: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .header("x-request-id", "integration")
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

/// Provider whose files exist but can never be read.
pub struct UnreadableFiles;

impl FileProvider for UnreadableFiles {
    type Identifier = String;

    fn identifier_for(&self, path: &str) -> Option<String> {
        Some(path.to_string())
    }

    async fn read(&self, id: &String) -> Result<Bytes, FileError> {
        Err(FileError::Io {
            path: id.clone(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        })
    }
}
