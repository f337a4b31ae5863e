//! Redirect action.

use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::http::request::RequestContext;
use crate::http::response::empty_response;
use crate::observability::events::{EventSink, RequestEvent};
use crate::observability::metrics::{self, Outcome};

/// Bytes re-encoded when a decoded path goes back into a `Location` header.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Permanent redirect to `destination`, a decoded path.
pub fn redirect(destination: &str, context: &RequestContext, sink: &dyn EventSink) -> Response {
    let location = utf8_percent_encode(destination, LOCATION_ENCODE_SET).to_string();
    let Ok(location) = HeaderValue::from_str(&location) else {
        return empty_response(StatusCode::INTERNAL_SERVER_ERROR);
    };

    let status = StatusCode::MOVED_PERMANENTLY;
    let mut response = empty_response(status);
    response.headers_mut().insert(LOCATION, location);

    sink.debug(
        RequestEvent::new(
            context,
            status,
            format!("The URI path is redirected to this path: {destination}"),
        )
        .with_redirect(destination),
    );
    metrics::record_outcome(Outcome::Redirect);

    response
}
