//! # Upstream Source Traits
//!
//! Port definitions for the two upstream services a quote depends on.
//!
//! Implementations perform exactly one request per call. Resilience
//! (circuit breaking, retry, deadlines, fallbacks) is layered on top by the
//! application lookups, so these traits stay trivially mockable.
//!
//! # Examples
//!
//! ```ignore
//! use loyalty_quote::infrastructure::upstream::traits::RateSource;
//!
//! #[async_trait::async_trait]
//! impl RateSource for MyFxFeed {
//!     fn service_name(&self) -> &str { "fx-service" }
//!     async fn fetch_rate(&self, currency: Currency) -> UpstreamResult<Decimal> { /* ... */ }
//! }
//! ```

use crate::domain::entities::PromotionResult;
use crate::domain::value_objects::Currency;
use crate::infrastructure::upstream::error::UpstreamResult;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt;

/// Source of exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync + fmt::Debug {
    /// Returns the upstream identity used in errors and logs.
    fn service_name(&self) -> &str;

    /// Fetches the current rate for a currency.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` for any transport failure, non-200 status
    /// or undecodable body.
    async fn fetch_rate(&self, currency: Currency) -> UpstreamResult<Decimal>;
}

/// Source of promotion terms.
#[async_trait]
pub trait PromotionSource: Send + Sync + fmt::Debug {
    /// Returns the upstream identity used in errors and logs.
    fn service_name(&self) -> &str;

    /// Fetches the terms of a promotion code.
    ///
    /// # Errors
    ///
    /// Returns an `UpstreamError` for any transport failure, non-200 status
    /// or undecodable body.
    async fn fetch_promotion(&self, code: &str) -> UpstreamResult<PromotionResult>;
}
