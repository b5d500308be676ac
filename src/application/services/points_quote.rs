//! # Points Quote Service
//!
//! Orchestrates a quote: validate, compute base points, fetch the FX rate,
//! resolve the promotion, then assemble the capped breakdown.
//!
//! # Flow
//!
//! ```text
//! request ─▶ validate ─▶ RateLookup ─▶ PromotionLookup ─▶ breakdown ─▶ response
//!               │             │
//!               ▼             ▼
//!            400 error   502/503 error
//! ```
//!
//! The rate lookup finishes, retry included, before the promotion lookup
//! starts. Promotion failures never fail the quote.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::promotion_lookup::PromotionLookup;
use crate::application::services::rate_lookup::RateLookup;
use crate::domain::entities::{QuoteRequest, QuoteResponse, ValidatedQuoteRequest};
use crate::domain::services::PointsCalculator;
use crate::domain::value_objects::{CabinClass, Currency, CustomerTier};
use rust_decimal::Decimal;
use tracing::info;

/// Quote orchestrator.
#[derive(Debug)]
pub struct PointsQuoteService {
    rate_lookup: RateLookup,
    promotion_lookup: PromotionLookup,
    calculator: PointsCalculator,
}

impl PointsQuoteService {
    /// Creates the service.
    #[must_use]
    pub fn new(
        rate_lookup: RateLookup,
        promotion_lookup: PromotionLookup,
        calculator: PointsCalculator,
    ) -> Self {
        Self {
            rate_lookup,
            promotion_lookup,
            calculator,
        }
    }

    /// Returns the rate lookup.
    #[inline]
    #[must_use]
    pub fn rate_lookup(&self) -> &RateLookup {
        &self.rate_lookup
    }

    /// Returns the points calculator.
    #[inline]
    #[must_use]
    pub fn calculator(&self) -> &PointsCalculator {
        &self.calculator
    }

    /// Validates a raw request. Checks run in a fixed order and the first
    /// failure wins.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRequest` with one of `Missing body`,
    /// `Invalid fare`, `Invalid currency`, `Invalid cabin` or `Invalid tier`.
    pub fn validate(request: Option<&QuoteRequest>) -> ApplicationResult<ValidatedQuoteRequest> {
        let request = request.ok_or_else(|| ApplicationError::invalid_request("Missing body"))?;

        let fare_amount = request
            .fare_amount
            .filter(|fare| *fare > Decimal::ZERO)
            .ok_or_else(|| ApplicationError::invalid_request("Invalid fare"))?;
        let currency = request
            .currency
            .as_deref()
            .and_then(|code| code.parse::<Currency>().ok())
            .ok_or_else(|| ApplicationError::invalid_request("Invalid currency"))?;
        let cabin_class = request
            .cabin_class
            .as_deref()
            .and_then(|code| code.parse::<CabinClass>().ok())
            .ok_or_else(|| ApplicationError::invalid_request("Invalid cabin"))?;
        let customer_tier = request
            .customer_tier
            .as_deref()
            .and_then(|code| code.parse::<CustomerTier>().ok())
            .ok_or_else(|| ApplicationError::invalid_request("Invalid tier"))?;

        Ok(ValidatedQuoteRequest::new(
            fare_amount,
            currency,
            cabin_class,
            customer_tier,
            request.promo_code().map(str::to_string),
        ))
    }

    /// Validates and quotes a raw request.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::InvalidRequest` if validation fails
    /// - `ApplicationError::UpstreamService` / `ServiceUnavailable` if the
    ///   FX rate cannot be obtained
    pub async fn quote(&self, request: Option<&QuoteRequest>) -> ApplicationResult<QuoteResponse> {
        let validated = Self::validate(request)?;
        self.quote_validated(&validated).await
    }

    /// Quotes an already validated request.
    ///
    /// # Errors
    ///
    /// As [`Self::quote`], minus validation.
    pub async fn quote_validated(
        &self,
        request: &ValidatedQuoteRequest,
    ) -> ApplicationResult<QuoteResponse> {
        info!(
            fare_amount = %request.fare_amount(),
            currency = %request.currency(),
            cabin_class = %request.cabin_class(),
            customer_tier = %request.customer_tier(),
            has_promo_code = request.promo_code().is_some(),
            "processing points quote"
        );

        let rate = self.rate_lookup.get_rate(request.currency()).await?;
        let promotion = self
            .promotion_lookup
            .get_promotion(request.promo_code())
            .await;

        let base_points = self.calculator.base_points(request.fare_amount());
        let breakdown = self
            .calculator
            .breakdown(base_points, request.customer_tier(), &promotion);
        if breakdown.is_capped() {
            info!(
                cap = self.calculator.cap(),
                base_points = breakdown.base_points(),
                tier_bonus = breakdown.tier_bonus(),
                promo_bonus = breakdown.promo_bonus(),
                "points cap reached"
            );
        }

        let response = QuoteResponse::new(breakdown, rate, &promotion);
        info!(
            total_points = response.total_points,
            effective_fx_rate = %response.effective_fx_rate,
            warnings = response.warnings.len(),
            "points quote computed"
        );
        Ok(response)
    }
}
