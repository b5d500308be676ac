//! # REST API
//!
//! HTTP surface of the quote service, built on axum.
//!
//! # Endpoints
//!
//! ## Quotes
//! - `POST /v1/points/quote` - Quote loyalty points for a fare
//!
//! ## Health
//! - `GET /health/live` - Liveness probe, answers `OK`
//! - `GET /health/ready` - Readiness probe, answers `READY`
//!
//! Every response carries an `X-Correlation-ID` header, echoed from the
//! request or freshly generated. Errors use the [`ErrorResponse`] body.
//!
//! # Usage
//!
//! ```ignore
//! use loyalty_quote::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState { quote_service });
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{ApiError, AppState, ErrorResponse};
pub use middleware::CORRELATION_ID_HEADER;
pub use routes::create_router;
