//! Request identity and tracing.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Propagate the ID to the response and into the request's trace span
//!
//! # Design Decisions
//! - IDs ride in the `x-request-id` header, inbound IDs are preserved
//! - The trace span carries the ID so every log line of a request can be
//!   correlated without threading it through handlers

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request-id header as a typed name.
pub fn x_request_id() -> HeaderName {
    HeaderName::from_static(X_REQUEST_ID)
}

/// UUID v4 request-id source for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Span for `TraceLayer`, tagged with the request ID set by the layer
/// running before it.
pub fn request_span(request: &Request<Body>) -> Span {
    match request.headers().get(X_REQUEST_ID) {
        Some(request_id) => info_span!("http_request", request_id = ?request_id),
        None => info_span!("http_request"),
    }
}
