//! # REST Middleware
//!
//! Correlation ID handling and request logging.
//!
//! Incoming `X-Correlation-ID` values are kept when non-blank. Otherwise
//! a UUID v4 is generated by tower-http's request-id layer, and the value
//! is echoed on the response.

use axum::extract::Request;
use axum::http::HeaderName;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{Instrument, info, info_span};

/// Correlation ID header, lower-cased.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Returns the correlation ID header name.
#[must_use]
pub fn correlation_id_header() -> HeaderName {
    HeaderName::from_static(CORRELATION_ID_HEADER)
}

/// Removes a blank correlation ID so a fresh one gets generated.
#[allow(clippy::unused_async)]
pub async fn strip_blank_correlation_id(mut request: Request) -> Request {
    let blank = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .is_some_and(|value| value.to_str().map_or(true, |v| v.trim().is_empty()));
    if blank {
        request.headers_mut().remove(CORRELATION_ID_HEADER);
    }
    request
}

/// Logs request start and completion inside a span carrying the
/// correlation ID.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let span = info_span!(
        "request",
        correlation_id = %correlation_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = Instant::now();
        info!("request started");
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}
