//! Serve action.

use axum::http::StatusCode;
use axum::response::Response;

use crate::files::FileProvider;
use crate::http::middleware::docc::DoccError;
use crate::http::request::RequestContext;
use crate::http::response::{content_type_for, empty_response, file_response};
use crate::observability::events::{EventSink, RequestEvent};
use crate::observability::metrics::{self, Outcome};

/// Serve `relative` from the archive bundle at `archive_path`.
///
/// A missing file is answered with 404; a failed read is returned as an error.
pub async fn serve<P: FileProvider>(
    relative: &str,
    archive_path: &str,
    context: &RequestContext,
    provider: &P,
    sink: &dyn EventSink,
) -> Result<Response, DoccError> {
    let resource = format!("{archive_path}{relative}");

    let Some(id) = provider.identifier_for(&resource) else {
        sink.error(
            RequestEvent::new(
                context,
                StatusCode::NOT_FOUND,
                format!("The resource {resource} has not been found."),
            )
            .with_resource(resource.as_str()),
        );
        metrics::record_outcome(Outcome::NotFound);
        return Ok(empty_response(StatusCode::NOT_FOUND));
    };

    let body = match provider.read(&id).await {
        Ok(body) => body,
        Err(source) => {
            metrics::record_outcome(Outcome::ReadError);
            return Err(DoccError::Read { resource, source });
        }
    };

    let length = body.len();
    sink.debug(
        RequestEvent::new(
            context,
            StatusCode::OK,
            format!("The body of the resource {resource} has {length} bytes."),
        )
        .with_resource(resource.as_str())
        .with_bytes(length),
    );
    metrics::record_outcome(Outcome::Served);
    metrics::record_served_bytes(length);

    Ok(file_response(body, content_type_for(&resource)))
}
