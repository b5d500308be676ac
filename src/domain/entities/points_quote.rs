//! # Points Quote
//!
//! The quote returned to the caller.
//!
//! A [`QuoteResponse`] combines the point breakdown with the FX rate that was
//! in effect when the quote was computed. The rate is reported for audit and
//! display only; points are computed on the fare amount as given.

use crate::domain::entities::promotion::PromotionResult;
use crate::domain::services::PointsBreakdown;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Warning codes attached to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteWarning {
    /// The applied promotion is about to expire.
    PromoExpiresSoon,
}

impl fmt::Display for QuoteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PromoExpiresSoon => write!(f, "PROMO_EXPIRES_SOON"),
        }
    }
}

/// Points quote for a single fare.
///
/// # Invariants
///
/// - `total_points` = min(cap, `base_points` + `tier_bonus` + `promo_bonus`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Truncated fare amount.
    pub base_points: u64,
    /// Bonus from the customer tier.
    pub tier_bonus: u64,
    /// Bonus from the promotion, zero when none applied.
    pub promo_bonus: u64,
    /// Capped total.
    pub total_points: u64,
    /// Rate returned by the FX service.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub effective_fx_rate: Decimal,
    /// Warning codes, in a stable order.
    pub warnings: Vec<QuoteWarning>,
}

impl QuoteResponse {
    /// Assembles a response from a breakdown, the FX rate and the resolved
    /// promotion.
    #[must_use]
    pub fn new(breakdown: PointsBreakdown, fx_rate: Decimal, promotion: &PromotionResult) -> Self {
        let warnings = if promotion.expires_soon() {
            vec![QuoteWarning::PromoExpiresSoon]
        } else {
            Vec::new()
        };

        Self {
            base_points: breakdown.base_points(),
            tier_bonus: breakdown.tier_bonus(),
            promo_bonus: breakdown.promo_bonus(),
            total_points: breakdown.total_points(),
            effective_fx_rate: fx_rate,
            warnings,
        }
    }

    /// Returns true if the given warning is present.
    #[must_use]
    pub fn has_warning(&self, warning: QuoteWarning) -> bool {
        self.warnings.contains(&warning)
    }
}
