//! # Application Errors
//!
//! Error types for the application layer.
//!
//! Every quote failure maps to one of four kinds, and each kind has a fixed
//! HTTP status and label on the wire.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── InvalidRequest(String)      - 400, request failed validation
//! ├── UpstreamService { .. }      - 502, FX lookup failed after retry
//! ├── ServiceUnavailable { .. }   - 503, FX lookup rejected by open breaker
//! └── Internal(String)            - 500, anything unexpected
//! ```
//!
//! # Examples
//!
//! ```
//! use loyalty_quote::application::error::{ApplicationError, ErrorKind};
//!
//! let err = ApplicationError::invalid_request("Invalid currency");
//! assert_eq!(err.kind(), ErrorKind::InvalidRequest);
//! assert_eq!(err.kind().status_code(), 400);
//! assert_eq!(err.to_string(), "Invalid currency");
//! ```

use crate::application::services::circuit_breaker::CircuitBreakerError;
use crate::infrastructure::upstream::error::UpstreamError;
use std::fmt;
use thiserror::Error;

/// Error kind, used to pick the HTTP status and label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or semantically invalid request.
    InvalidRequest,
    /// An upstream dependency failed.
    UpstreamService,
    /// An upstream dependency is temporarily refused.
    ServiceUnavailable,
    /// Unexpected failure.
    Internal,
}

impl ErrorKind {
    /// Returns the HTTP status code for this kind.
    #[inline]
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::UpstreamService => 502,
            Self::ServiceUnavailable => 503,
            Self::Internal => 500,
        }
    }

    /// Returns the human-readable label carried in error responses.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Validation Error",
            Self::UpstreamService => "Bad Gateway",
            Self::ServiceUnavailable => "Service Unavailable",
            Self::Internal => "Internal Server Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Application layer error.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request validation failed.
    #[error("{0}")]
    InvalidRequest(String),

    /// An upstream call failed after all attempts.
    #[error("{message}")]
    UpstreamService {
        /// Upstream identity, e.g. `fx-service`.
        service: String,
        /// Caller-facing message.
        message: String,
        /// Failure of the final attempt.
        #[source]
        cause: CircuitBreakerError<UpstreamError>,
    },

    /// Every attempt was rejected by an open circuit breaker.
    #[error("{message}")]
    ServiceUnavailable {
        /// Upstream identity.
        service: String,
        /// Caller-facing message.
        message: String,
    },

    /// Unexpected failure.
    #[error("{0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an upstream service error.
    #[must_use]
    pub fn upstream_service(
        service: impl Into<String>,
        message: impl Into<String>,
        cause: CircuitBreakerError<UpstreamError>,
    ) -> Self {
        Self::UpstreamService {
            service: service.into(),
            message: message.into(),
            cause,
        }
    }

    /// Creates a service unavailable error.
    #[must_use]
    pub fn service_unavailable(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::UpstreamService { .. } => ErrorKind::UpstreamService,
            Self::ServiceUnavailable { .. } => ErrorKind::ServiceUnavailable,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns the upstream service name, if an upstream is involved.
    #[must_use]
    pub fn service(&self) -> Option<&str> {
        match self {
            Self::UpstreamService { service, .. } | Self::ServiceUnavailable { service, .. } => {
                Some(service)
            }
            _ => None,
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn kinds_map_to_status_and_label() {
        assert_eq!(ErrorKind::InvalidRequest.status_code(), 400);
        assert_eq!(ErrorKind::UpstreamService.status_code(), 502);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
        assert_eq!(ErrorKind::Internal.status_code(), 500);

        assert_eq!(ErrorKind::InvalidRequest.label(), "Validation Error");
        assert_eq!(ErrorKind::UpstreamService.label(), "Bad Gateway");
        assert_eq!(ErrorKind::ServiceUnavailable.label(), "Service Unavailable");
        assert_eq!(ErrorKind::Internal.label(), "Internal Server Error");
    }

    #[test]
    fn invalid_request_displays_message() {
        let err = ApplicationError::invalid_request("Invalid fare amount");
        assert_eq!(err.to_string(), "Invalid fare amount");
        assert!(err.is_validation());
        assert_eq!(err.service(), None);
    }

    #[test]
    fn upstream_service_keeps_cause() {
        let err = ApplicationError::upstream_service(
            "fx-service",
            "FX rate lookup failed for USD",
            CircuitBreakerError::Call(UpstreamError::unexpected_status(500, "")),
        );
        assert_eq!(err.kind(), ErrorKind::UpstreamService);
        assert_eq!(err.service(), Some("fx-service"));
        assert_eq!(err.to_string(), "FX rate lookup failed for USD");
        assert!(err.source().is_some_and(|cause| cause.to_string().contains("500")));
    }

    #[test]
    fn service_unavailable() {
        let err = ApplicationError::service_unavailable("fx-service", "circuit open");
        assert_eq!(err.kind().status_code(), 503);
        assert_eq!(err.service(), Some("fx-service"));
    }

    #[test]
    fn internal_error() {
        let err = ApplicationError::internal("unexpected state");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.to_string(), "unexpected state");
        assert_eq!(err.service(), None);
    }
}
