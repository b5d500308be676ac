//! Loyalty quote service binary.

use anyhow::Context;
use loyalty_quote::api::rest::{AppState, create_router};
use loyalty_quote::application::services::{
    CircuitBreakerConfig, PointsQuoteService, PromotionLookup, RateLookup, RetryPolicy,
};
use loyalty_quote::domain::services::PointsCalculator;
use loyalty_quote::infrastructure::config::AppConfig;
use loyalty_quote::infrastructure::telemetry::init_tracing;
use loyalty_quote::infrastructure::upstream::{HttpFxService, HttpPromoService};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(config.logging.format)?;

    let state = Arc::new(AppState {
        quote_service: build_quote_service(&config)?,
    });
    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        fx_base_url = %config.fx_base_url(),
        promo_base_url = %config.promo_base_url(),
        points_cap = config.points.cap,
        "loyalty quote service listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("loyalty quote service stopped");
    Ok(())
}

fn build_quote_service(config: &AppConfig) -> anyhow::Result<PointsQuoteService> {
    let request_timeout_ms = config.http.request_timeout_ms;
    let fx = HttpFxService::new(config.fx_base_url(), request_timeout_ms)
        .context("failed to build fx-service client")?;
    let promo = HttpPromoService::new(config.promo_base_url(), request_timeout_ms)
        .context("failed to build promo-service client")?;

    let breaker = CircuitBreakerConfig::from_millis(
        config.circuit_breaker.max_failures,
        config.circuit_breaker.timeout_ms,
        config.circuit_breaker.reset_timeout_ms,
    );
    let rate_lookup = RateLookup::new(
        Arc::new(fx),
        breaker,
        RetryPolicy::single_retry(Duration::from_millis(config.fx.retry_delay_ms)),
    );
    let promotion_lookup = PromotionLookup::new(
        Arc::new(promo),
        Duration::from_millis(config.promo.timeout_ms),
    );

    Ok(PointsQuoteService::new(
        rate_lookup,
        promotion_lookup,
        PointsCalculator::new(config.points.cap),
    ))
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
