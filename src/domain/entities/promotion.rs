//! # Promotion Result
//!
//! Bonus terms resolved for a promotion code.

use serde::{Deserialize, Deserializer, Serialize};

/// Bonus terms of a promotion.
///
/// Each field of the promotion service body decodes on its own. A missing
/// or `null` field takes its neutral value, so `{}` decodes to
/// [`PromotionResult::neutral`] and `{"expiresSoon": true}` keeps the warning.
///
/// # Examples
///
/// ```
/// use loyalty_quote::domain::entities::PromotionResult;
///
/// let promo: PromotionResult = serde_json::from_str(r#"{"bonusPercent": 25}"#).unwrap();
/// assert_eq!(promo.bonus_percent(), 25);
/// assert!(!promo.expires_soon());
/// assert!(PromotionResult::neutral().is_neutral());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    bonus_percent: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    expires_soon: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PromotionResult {
    /// Creates a promotion result.
    #[must_use]
    pub const fn new(bonus_percent: u32, expires_soon: bool) -> Self {
        Self {
            bonus_percent,
            expires_soon,
        }
    }

    /// The fallback used whenever no real answer is available: no bonus,
    /// no expiry warning.
    #[must_use]
    pub const fn neutral() -> Self {
        Self::new(0, false)
    }

    /// Returns the bonus percentage.
    #[inline]
    #[must_use]
    pub const fn bonus_percent(&self) -> u32 {
        self.bonus_percent
    }

    /// Returns true if the promotion is about to expire.
    #[inline]
    #[must_use]
    pub const fn expires_soon(&self) -> bool {
        self.expires_soon
    }

    /// Returns true if this is the neutral result.
    #[inline]
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.bonus_percent == 0 && !self.expires_soon
    }
}
