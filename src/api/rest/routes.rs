//! # REST Routes
//!
//! Router assembly.

use crate::api::rest::handlers::{AppState, health_live, health_ready, quote_points};
use crate::api::rest::middleware::{correlation_id_header, log_requests, strip_blank_correlation_id};
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Builds the service router.
///
/// Layers run outermost first: blank correlation IDs are dropped, a missing
/// one is generated, the response echoes it, then the request is logged.
pub fn create_router(state: Arc<AppState>) -> Router {
    let correlation = correlation_id_header();

    Router::new()
        .route("/v1/points/quote", post(quote_points))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::map_request(strip_blank_correlation_id))
                .layer(SetRequestIdLayer::new(correlation.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(correlation))
                .layer(middleware::from_fn(log_requests)),
        )
        .with_state(state)
}
