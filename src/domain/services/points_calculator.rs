//! # Points Calculator
//!
//! Pure point arithmetic for a quote.
//!
//! All bonuses truncate toward zero and the total is capped:
//!
//! ```text
//! base  = floor(fare)
//! tier  = floor(base * tier_rate)
//! promo = floor(base * bonus_percent / 100)
//! total = min(cap, base + tier + promo)
//! ```
//!
//! Every step saturates at `u64::MAX`, so an oversized fare or bonus lands
//! on the cap instead of failing.
//!
//! # Examples
//!
//! ```
//! use loyalty_quote::domain::entities::PromotionResult;
//! use loyalty_quote::domain::services::PointsCalculator;
//! use loyalty_quote::domain::value_objects::CustomerTier;
//! use rust_decimal::Decimal;
//!
//! let calculator = PointsCalculator::new(50_000);
//! let base = calculator.base_points(Decimal::new(123450, 2));
//! let breakdown = calculator.breakdown(base, CustomerTier::Silver, &PromotionResult::new(25, true));
//!
//! assert_eq!(breakdown.total_points(), 1727);
//! ```

use crate::domain::entities::PromotionResult;
use crate::domain::value_objects::CustomerTier;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Default maximum number of points a single quote may award.
pub const DEFAULT_POINTS_CAP: u64 = 50_000;

/// Point breakdown of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PointsBreakdown {
    base_points: u64,
    tier_bonus: u64,
    promo_bonus: u64,
    total_points: u64,
    capped: bool,
}

impl PointsBreakdown {
    /// Returns the base points.
    #[inline]
    #[must_use]
    pub fn base_points(&self) -> u64 {
        self.base_points
    }

    /// Returns the tier bonus.
    #[inline]
    #[must_use]
    pub fn tier_bonus(&self) -> u64 {
        self.tier_bonus
    }

    /// Returns the promotion bonus.
    #[inline]
    #[must_use]
    pub fn promo_bonus(&self) -> u64 {
        self.promo_bonus
    }

    /// Returns the capped total.
    #[inline]
    #[must_use]
    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Returns true if the uncapped sum reached or exceeded the cap.
    #[inline]
    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.capped
    }
}

/// Computes point breakdowns against a fixed cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsCalculator {
    cap: u64,
}

impl Default for PointsCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_POINTS_CAP)
    }
}

/// Truncates toward zero. Negative values give zero, values past `u64::MAX`
/// give `u64::MAX`.
fn saturating_points(value: Decimal) -> u64 {
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u64().unwrap_or(u64::MAX)
}

impl PointsCalculator {
    /// Creates a calculator with the given cap.
    #[must_use]
    pub const fn new(cap: u64) -> Self {
        Self { cap }
    }

    /// Returns the configured cap.
    #[inline]
    #[must_use]
    pub const fn cap(&self) -> u64 {
        self.cap
    }

    /// Base points: the fare amount truncated toward zero.
    #[must_use]
    pub fn base_points(&self, fare_amount: Decimal) -> u64 {
        saturating_points(fare_amount)
    }

    /// Tier bonus: base points times the tier rate, truncated.
    #[must_use]
    pub fn tier_bonus(&self, base_points: u64, tier: CustomerTier) -> u64 {
        Decimal::from(base_points)
            .checked_mul(tier.bonus_rate())
            .map_or(u64::MAX, saturating_points)
    }

    /// Promotion bonus: base points times the bonus percentage over 100,
    /// using integer division.
    #[must_use]
    pub fn promo_bonus(&self, base_points: u64, bonus_percent: u32) -> u64 {
        let bonus = u128::from(base_points) * u128::from(bonus_percent) / 100;
        u64::try_from(bonus).unwrap_or(u64::MAX)
    }

    /// Computes the full breakdown for a base amount, tier and promotion.
    #[must_use]
    pub fn breakdown(
        &self,
        base_points: u64,
        tier: CustomerTier,
        promotion: &PromotionResult,
    ) -> PointsBreakdown {
        let tier_bonus = self.tier_bonus(base_points, tier);
        let promo_bonus = self.promo_bonus(base_points, promotion.bonus_percent());
        let uncapped = base_points
            .saturating_add(tier_bonus)
            .saturating_add(promo_bonus);

        PointsBreakdown {
            base_points,
            tier_bonus,
            promo_bonus,
            total_points: uncapped.min(self.cap),
            capped: uncapped >= self.cap,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn calculator() -> PointsCalculator {
        PointsCalculator::default()
    }

    #[test]
    fn sample_quote_numbers() {
        let calc = calculator();
        let base = calc.base_points(Decimal::new(123450, 2));
        let breakdown = calc.breakdown(base, CustomerTier::Silver, &PromotionResult::new(25, true));

        assert_eq!(breakdown.base_points(), 1234);
        assert_eq!(breakdown.tier_bonus(), 185);
        assert_eq!(breakdown.promo_bonus(), 308);
        assert_eq!(breakdown.total_points(), 1727);
        assert!(!breakdown.is_capped());
    }

    #[test]
    fn large_fare_is_capped() {
        let calc = calculator();
        let base = calc.base_points(Decimal::new(1_000_000, 0));
        let breakdown =
            calc.breakdown(base, CustomerTier::Platinum, &PromotionResult::new(25, false));

        assert_eq!(breakdown.total_points(), DEFAULT_POINTS_CAP);
        assert!(breakdown.is_capped());
    }

    #[test]
    fn sum_exactly_at_cap_is_flagged() {
        let breakdown =
            PointsCalculator::new(100).breakdown(100, CustomerTier::None, &PromotionResult::neutral());
        assert_eq!(breakdown.total_points(), 100);
        assert!(breakdown.is_capped());
    }

    #[test]
    fn tier_rates_truncate() {
        let calc = calculator();
        assert_eq!(calc.tier_bonus(1234, CustomerTier::None), 0);
        assert_eq!(calc.tier_bonus(1234, CustomerTier::Silver), 185);
        assert_eq!(calc.tier_bonus(1234, CustomerTier::Gold), 370);
        assert_eq!(calc.tier_bonus(1234, CustomerTier::Platinum), 617);
        assert_eq!(calc.tier_bonus(20, CustomerTier::Gold), 6);
    }

    #[test]
    fn zero_percent_promo_is_zero() {
        assert_eq!(calculator().promo_bonus(u64::MAX, 0), 0);
    }

    mod saturation {
        use super::*;

        #[test]
        fn fare_beyond_u64_saturates() {
            let calc = calculator();
            let fare = Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0);
            assert_eq!(calc.base_points(fare), u64::MAX);
            assert_eq!(calc.base_points(Decimal::MAX), u64::MAX);
        }

        #[test]
        fn negative_fare_is_zero() {
            assert_eq!(calculator().base_points(Decimal::new(-5, 0)), 0);
        }

        #[test]
        fn promo_bonus_saturates() {
            assert_eq!(calculator().promo_bonus(u64::MAX, 500), u64::MAX);
            assert_eq!(calculator().promo_bonus(u64::MAX, 50), u64::MAX / 2);
        }

        #[test]
        fn huge_base_lands_on_cap() {
            let calc = calculator();
            for (base, tier, percent) in [
                (u64::MAX, CustomerTier::None, 0),
                (15_000_000_000_000_000_000, CustomerTier::Platinum, 0),
                (100_000_000_000_000_000, CustomerTier::None, 200),
                (u64::MAX, CustomerTier::Platinum, u32::MAX),
            ] {
                let breakdown = calc.breakdown(base, tier, &PromotionResult::new(percent, false));
                assert_eq!(breakdown.total_points(), DEFAULT_POINTS_CAP);
                assert!(breakdown.is_capped());
            }
        }
    }

    proptest! {
        #[test]
        fn base_points_is_floor(cents in 1u64..10_000_000_000u64) {
            let fare = Decimal::new(i64::try_from(cents).unwrap(), 2);
            prop_assert_eq!(calculator().base_points(fare), cents / 100);
        }

        #[test]
        fn total_never_exceeds_cap(
            base in any::<u64>(),
            percent in any::<u32>(),
            cap in 1u64..1_000_000u64,
        ) {
            let breakdown = PointsCalculator::new(cap)
                .breakdown(base, CustomerTier::Platinum, &PromotionResult::new(percent, false));
            let sum = breakdown
                .base_points()
                .saturating_add(breakdown.tier_bonus())
                .saturating_add(breakdown.promo_bonus());
            prop_assert_eq!(breakdown.total_points(), sum.min(cap));
        }

        #[test]
        fn promo_bonus_is_integer_division(base in 0u64..1_000_000_000u64, percent in 0u32..=100u32) {
            prop_assert_eq!(
                calculator().promo_bonus(base, percent),
                base * u64::from(percent) / 100
            );
        }
    }
}
