//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! This module provides application-level services including:
//! - [`PointsQuoteService`]: Validation and quote orchestration
//! - [`RateLookup`]: Circuit-broken, retried FX rate lookup
//! - [`PromotionLookup`]: Deadline-bounded promotion lookup
//! - [`CircuitBreaker`]: Consecutive-failure breaker for upstream calls
//! - [`RetryPolicy`]: Fixed-delay retry

pub mod circuit_breaker;
pub mod points_quote;
pub mod promotion_lookup;
pub mod rate_lookup;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};
pub use points_quote::PointsQuoteService;
pub use promotion_lookup::PromotionLookup;
pub use rate_lookup::RateLookup;
pub use retry::{RetryExhausted, RetryPolicy};
