//! # Domain Enums
//!
//! Enumeration types for the fields of a points quote request.
//!
//! - [`Currency`] - Fare currency accepted by the quote endpoint
//! - [`CabinClass`] - Cabin the fare was booked in
//! - [`CustomerTier`] - Loyalty tier, each with a fixed bonus rate
//!
//! Parsing is exact: the wire values are upper-case codes and anything else
//! is rejected with a [`ParseEnumError`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fare currency.
///
/// # Examples
///
/// ```
/// use loyalty_quote::domain::value_objects::enums::Currency;
///
/// let usd: Currency = "USD".parse().unwrap();
/// assert_eq!(usd, Currency::Usd);
/// assert_eq!(usd.code(), "USD");
/// assert!("ZZZ".parse::<Currency>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Indian rupee.
    Inr,
}

impl Currency {
    /// All accepted currencies.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Eur, Self::Inr];

    /// Returns the ISO 4217 code, as used in the FX service path.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Inr => "INR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "INR" => Ok(Self::Inr),
            _ => Err(ParseEnumError::InvalidValue("Currency", s.to_string())),
        }
    }
}

/// Cabin class of the fare.
///
/// Carried through validation but not used by the points computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CabinClass {
    /// Economy cabin.
    Economy,
    /// Business cabin.
    Business,
    /// First class cabin.
    First,
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Economy => write!(f, "ECONOMY"),
            Self::Business => write!(f, "BUSINESS"),
            Self::First => write!(f, "FIRST"),
        }
    }
}

impl FromStr for CabinClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ECONOMY" => Ok(Self::Economy),
            "BUSINESS" => Ok(Self::Business),
            "FIRST" => Ok(Self::First),
            _ => Err(ParseEnumError::InvalidValue("CabinClass", s.to_string())),
        }
    }
}

/// Customer loyalty tier.
///
/// # Examples
///
/// ```
/// use loyalty_quote::domain::value_objects::enums::CustomerTier;
/// use rust_decimal::Decimal;
///
/// assert_eq!(CustomerTier::Silver.bonus_rate(), Decimal::new(15, 2));
/// assert_eq!(CustomerTier::None.bonus_rate(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerTier {
    /// No tier, no bonus.
    None,
    /// Silver tier, 15% bonus.
    Silver,
    /// Gold tier, 30% bonus.
    Gold,
    /// Platinum tier, 50% bonus.
    Platinum,
}

impl CustomerTier {
    /// Returns the fraction of base points awarded as tier bonus.
    #[inline]
    #[must_use]
    pub fn bonus_rate(self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Silver => Decimal::new(15, 2),
            Self::Gold => Decimal::new(30, 2),
            Self::Platinum => Decimal::new(50, 2),
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Silver => write!(f, "SILVER"),
            Self::Gold => write!(f, "GOLD"),
            Self::Platinum => write!(f, "PLATINUM"),
        }
    }
}

impl FromStr for CustomerTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Self::None),
            "SILVER" => Ok(Self::Silver),
            "GOLD" => Ok(Self::Gold),
            "PLATINUM" => Ok(Self::Platinum),
            _ => Err(ParseEnumError::InvalidValue("CustomerTier", s.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod currency {
        use super::*;

        #[test]
        fn from_str_accepts_supported_codes() {
            for currency in Currency::ALL {
                assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
            }
        }

        #[test]
        fn from_str_is_case_sensitive() {
            assert!("usd".parse::<Currency>().is_err());
            assert!("GBP".parse::<Currency>().is_err());
            assert!("".parse::<Currency>().is_err());
        }

        #[test]
        fn serde_uses_codes() {
            let json = serde_json::to_string(&Currency::Inr).unwrap();
            assert_eq!(json, "\"INR\"");
        }
    }

    mod cabin_class {
        use super::*;

        #[test]
        fn from_str_works() {
            assert_eq!("FIRST".parse::<CabinClass>().unwrap(), CabinClass::First);
            assert_eq!(
                "BUSINESS".parse::<CabinClass>().unwrap(),
                CabinClass::Business
            );
            assert!("PREMIUM".parse::<CabinClass>().is_err());
        }

        #[test]
        fn display_uppercase() {
            assert_eq!(CabinClass::Economy.to_string(), "ECONOMY");
        }
    }

    mod customer_tier {
        use super::*;

        #[test]
        fn bonus_rates() {
            assert_eq!(CustomerTier::None.bonus_rate(), Decimal::ZERO);
            assert_eq!(CustomerTier::Silver.bonus_rate(), Decimal::new(15, 2));
            assert_eq!(CustomerTier::Gold.bonus_rate(), Decimal::new(3, 1));
            assert_eq!(CustomerTier::Platinum.bonus_rate(), Decimal::new(5, 1));
        }

        #[test]
        fn from_str_round_trips_display() {
            for tier in [
                CustomerTier::None,
                CustomerTier::Silver,
                CustomerTier::Gold,
                CustomerTier::Platinum,
            ] {
                assert_eq!(tier.to_string().parse::<CustomerTier>().unwrap(), tier);
            }
        }

        #[test]
        fn from_str_rejects_unknown() {
            let err = "DIAMOND".parse::<CustomerTier>().unwrap_err();
            assert_eq!(err.to_string(), "invalid CustomerTier value: 'DIAMOND'");
        }
    }
}
