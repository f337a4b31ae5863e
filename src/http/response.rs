//! Response construction.
//!
//! # Responsibilities
//! - Build empty-bodied responses with an explicit `Content-Length: 0`
//! - Build file responses with length and content type
//!
//! # Design Decisions
//! - Builders are infallible: headers are inserted from known-valid values
//! - Content type is guessed from the file extension only

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;

/// Response with the given status and an empty body.
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
    response
}

/// `200 OK` response carrying a file body.
pub fn file_response(body: Bytes, content_type: HeaderValue) -> Response {
    let length = body.len();
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    response
}

/// MIME type for a resource path, by extension.
pub fn content_type_for(path: &str) -> HeaderValue {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}
