//! # Rate Lookup
//!
//! FX rate retrieval guarded by a circuit breaker with one retry on top.
//!
//! Each attempt goes through the same breaker, so a retry made after the
//! breaker opened is rejected without any network I/O.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError,
};
use crate::application::services::retry::RetryPolicy;
use crate::domain::value_objects::Currency;
use crate::infrastructure::upstream::error::UpstreamError;
use crate::infrastructure::upstream::traits::RateSource;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, error};

/// Circuit-broken, retried FX rate lookup.
#[derive(Debug)]
pub struct RateLookup {
    source: Arc<dyn RateSource>,
    breaker: CircuitBreaker,
    retry: RetryPolicy,
}

impl RateLookup {
    /// Creates a lookup with its own breaker, named after the source.
    #[must_use]
    pub fn new(
        source: Arc<dyn RateSource>,
        breaker_config: CircuitBreakerConfig,
        retry: RetryPolicy,
    ) -> Self {
        let breaker = CircuitBreaker::new(format!("{}-cb", source.service_name()), breaker_config);
        Self {
            source,
            breaker,
            retry,
        }
    }

    /// Returns the breaker guarding the source.
    #[inline]
    #[must_use]
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Fetches the rate for `currency`.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::ServiceUnavailable` if every attempt was rejected
    ///   by the open breaker
    /// - `ApplicationError::UpstreamService` if the attempts failed for any
    ///   other reason
    pub async fn get_rate(&self, currency: Currency) -> ApplicationResult<Decimal> {
        let outcome = self
            .retry
            .run("fx rate lookup", |_| {
                self.breaker.call(|| self.source.fetch_rate(currency))
            })
            .await;

        let exhausted = match outcome {
            Ok(rate) => {
                debug!(currency = %currency, rate = %rate, "fx rate resolved");
                return Ok(rate);
            }
            Err(exhausted) => exhausted,
        };

        let service = self.source.service_name();
        if exhausted.all(CircuitBreakerError::is_rejection) {
            error!(
                service,
                currency = %currency,
                attempts = exhausted.attempts(),
                "fx rate lookup rejected by open circuit breaker"
            );
            return Err(ApplicationError::service_unavailable(
                service,
                format!("FX rate lookup unavailable for {currency}: circuit breaker open"),
            ));
        }

        let cause: CircuitBreakerError<UpstreamError> = exhausted.into_last();
        error!(
            service,
            currency = %currency,
            error = %cause,
            "fx rate lookup failed"
        );
        Err(ApplicationError::upstream_service(
            service,
            format!("FX rate lookup failed for {currency}"),
            cause,
        ))
    }
}
