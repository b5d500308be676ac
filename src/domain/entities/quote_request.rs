//! # Quote Request
//!
//! Inbound points quote request, in raw and validated form.
//!
//! [`QuoteRequest`] mirrors the JSON body exactly as received: every field is
//! optional free-form text so that validation, not deserialization, decides
//! what is acceptable. [`ValidatedQuoteRequest`] is the typed result of a
//! successful validation.

use crate::domain::value_objects::{CabinClass, Currency, CustomerTier};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw quote request as received on the wire.
///
/// # Examples
///
/// ```
/// use loyalty_quote::domain::entities::QuoteRequest;
///
/// let json = r#"{"fareAmount": 1234.50, "currency": "USD", "cabinClass": "ECONOMY",
///               "customerTier": "SILVER", "promoCode": "SUMMER25"}"#;
/// let request: QuoteRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.currency.as_deref(), Some("USD"));
/// assert_eq!(request.promo_code(), Some("SUMMER25"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    /// Fare amount in the fare currency.
    #[serde(default)]
    pub fare_amount: Option<Decimal>,
    /// Currency code, e.g. `USD`.
    #[serde(default)]
    pub currency: Option<String>,
    /// Cabin class code, e.g. `ECONOMY`.
    #[serde(default)]
    pub cabin_class: Option<String>,
    /// Customer tier code, e.g. `GOLD`.
    #[serde(default)]
    pub customer_tier: Option<String>,
    /// Optional promotion code.
    #[serde(default)]
    pub promo_code: Option<String>,
}

impl QuoteRequest {
    /// Returns the promotion code when one was actually requested.
    ///
    /// Absent and blank codes both mean "no promotion". Any other code is
    /// returned as sent, surrounding whitespace included.
    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }
}

/// A quote request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuoteRequest {
    fare_amount: Decimal,
    currency: Currency,
    cabin_class: CabinClass,
    customer_tier: CustomerTier,
    promo_code: Option<String>,
}

impl ValidatedQuoteRequest {
    /// Creates a validated request from already-parsed parts.
    #[must_use]
    pub fn new(
        fare_amount: Decimal,
        currency: Currency,
        cabin_class: CabinClass,
        customer_tier: CustomerTier,
        promo_code: Option<String>,
    ) -> Self {
        Self {
            fare_amount,
            currency,
            cabin_class,
            customer_tier,
            promo_code,
        }
    }

    /// Returns the fare amount.
    #[inline]
    #[must_use]
    pub fn fare_amount(&self) -> Decimal {
        self.fare_amount
    }

    /// Returns the fare currency.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the cabin class.
    #[inline]
    #[must_use]
    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }

    /// Returns the customer tier.
    #[inline]
    #[must_use]
    pub fn customer_tier(&self) -> CustomerTier {
        self.customer_tier
    }

    /// Returns the promotion code, if one was requested.
    #[inline]
    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }
}
