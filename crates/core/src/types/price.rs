//! Type-safe price representation using decimal arithmetic.
//!
//! List prices are non-negative decimals in the store currency's standard
//! unit (dollars, not cents). All money math in the engine goes through
//! [`rust_decimal::Decimal`] so totals never accumulate float error.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative list price.
///
/// The wrapper serializes transparently as its decimal amount and rejects
/// negative values at construction and deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents (e.g., `8999` -> 89.99).
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::new(
            i64::try_from(cents).unwrap_or(i64::MAX),
            2,
        ))
    }

    /// The decimal amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount after applying a percentage discount.
    ///
    /// `percent` is an integer 0-100; values above 100 are treated as 100
    /// so the result stays non-negative.
    #[must_use]
    pub fn discounted_by(&self, percent: u8) -> Decimal {
        let percent = Decimal::from(percent.min(100));
        self.0 * (Decimal::ONE - percent / Decimal::ONE_HUNDRED)
    }

    /// Format for display in the given currency (e.g., "$19.99").
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        format!("{}{:.2}", currency.symbol(), self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// ISO 4217 currency codes supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
        }
    }

    /// The ISO 4217 code for this currency.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        let result = Price::new(Decimal::new(-1, 2));
        assert!(matches!(result, Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(8999);
        assert_eq!(price.amount(), Decimal::new(8999, 2));
    }

    #[test]
    fn test_discounted_by() {
        // 50.00 at 20% off -> 40.00
        let price = Price::from_cents(5000);
        assert_eq!(price.discounted_by(20), Decimal::new(4000, 2));
    }

    #[test]
    fn test_discounted_by_zero_percent_is_list_price() {
        let price = Price::from_cents(5000);
        assert_eq!(price.discounted_by(0), price.amount());
    }

    #[test]
    fn test_discounted_by_clamps_above_hundred() {
        let price = Price::from_cents(5000);
        assert_eq!(price.discounted_by(150), Decimal::ZERO);
    }

    #[test]
    fn test_display_with_currency() {
        let price = Price::from_cents(1999);
        assert_eq!(price.display(CurrencyCode::USD), "$19.99");
    }

    #[test]
    fn test_serde_rejects_negative() {
        let result: Result<Price, _> = serde_json::from_str("\"-5.00\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_ordering_is_numeric() {
        assert!(Price::from_cents(999) < Price::from_cents(1000));
    }
}
