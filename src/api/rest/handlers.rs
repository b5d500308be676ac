//! # REST Handlers
//!
//! Request handlers, shared state and the error body.

use crate::api::rest::middleware::CORRELATION_ID_HEADER;
use crate::application::error::{ApplicationError, ErrorKind};
use crate::application::services::PointsQuoteService;
use crate::domain::entities::QuoteRequest;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared state for all handlers.
#[derive(Debug)]
pub struct AppState {
    /// Quote orchestrator.
    pub quote_service: PointsQuoteService,
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Status label, e.g. `Validation Error`.
    pub error: String,
    /// Error detail.
    pub message: String,
    /// HTTP status code.
    pub status: u16,
    /// Request path.
    pub path: String,
    /// When the error was produced.
    pub timestamp: DateTime<Utc>,
    /// Correlation ID of the request.
    pub correlation_id: Option<String>,
}

/// An application error bound to the request it failed.
#[derive(Debug)]
pub struct ApiError {
    error: ApplicationError,
    path: String,
    correlation_id: Option<String>,
}

impl ApiError {
    /// Binds `error` to a request path and correlation ID.
    #[must_use]
    pub fn new(error: ApplicationError, path: impl Into<String>, correlation_id: Option<String>) -> Self {
        Self {
            error,
            path: path.into(),
            correlation_id,
        }
    }

    /// Builds the JSON body.
    #[must_use]
    pub fn body(&self) -> ErrorResponse {
        let kind = self.error.kind();
        ErrorResponse {
            error: kind.label().to_string(),
            message: self.error.to_string(),
            status: kind.status_code(),
            path: self.path.clone(),
            timestamp: Utc::now(),
            correlation_id: self.correlation_id.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.error.kind();
        match kind {
            ErrorKind::InvalidRequest => {
                info!(path = %self.path, reason = %self.error, "rejected invalid quote request");
            }
            ErrorKind::UpstreamService | ErrorKind::ServiceUnavailable => {
                warn!(
                    path = %self.path,
                    service = self.error.service().unwrap_or_default(),
                    error = %self.error,
                    "quote failed on upstream dependency"
                );
            }
            ErrorKind::Internal => {
                error!(path = %self.path, error = %self.error, "unexpected error while quoting");
            }
        }

        let status =
            StatusCode::from_u16(kind.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body())).into_response()
    }
}

/// Parses the raw request body.
///
/// An empty or whitespace-only body, or a JSON `null`, is a missing body.
///
/// # Errors
///
/// Returns `ApplicationError::InvalidRequest` for malformed JSON.
pub fn parse_quote_request(body: &[u8]) -> Result<Option<QuoteRequest>, ApplicationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<Option<QuoteRequest>>(body)
        .map_err(|e| ApplicationError::invalid_request(format!("Invalid request body: {e}")))
}

fn correlation_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// `POST /v1/points/quote`
pub async fn quote_points(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Response {
    let outcome = match parse_quote_request(&body) {
        Ok(request) => state.quote_service.quote(request.as_ref()).await,
        Err(error) => Err(error),
    };

    match outcome {
        Ok(quote) => ([(header::CACHE_CONTROL, "no-store")], Json(quote)).into_response(),
        Err(error) => ApiError::new(error, uri.path(), correlation_id(&headers)).into_response(),
    }
}

/// `GET /health/live`
#[allow(clippy::unused_async)]
pub async fn health_live() -> &'static str {
    "OK"
}

/// `GET /health/ready`
#[allow(clippy::unused_async)]
pub async fn health_ready() -> &'static str {
    "READY"
}
