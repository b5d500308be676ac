//! # Upstream Errors
//!
//! Error types for calls to the FX and promotion services.
//!
//! Every variant counts as a plain failure for circuit-breaker accounting
//! and retry purposes; the variants exist for logs and error messages.
//!
//! # Examples
//!
//! ```
//! use loyalty_quote::infrastructure::upstream::error::UpstreamError;
//!
//! let error = UpstreamError::unexpected_status(503, "maintenance");
//! assert_eq!(error.status(), Some(503));
//! assert!(error.to_string().contains("503"));
//! ```

use thiserror::Error;

/// Error type for upstream HTTP calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Request timed out at the HTTP client.
    #[error("upstream timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("upstream connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The service answered with a status other than 200.
    #[error("upstream returned HTTP {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// A 200 response whose body could not be decoded.
    #[error("upstream response decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// The client or URL could not be built.
    #[error("upstream client configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },
}

impl UpstreamError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an unexpected status error.
    #[must_use]
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns the HTTP status, if the service answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this is a client-side timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
