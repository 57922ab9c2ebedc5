//! Non-negative money amounts with two-place precision.
//!
//! Prices behave like a `DECIMAL(10,2)` column with `CHECK (price >= 0)`:
//! extra fractional digits are rounded half away from zero, and negative
//! amounts or amounts beyond eight integer digits are rejected.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Reasons a price is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price must not be negative (got {0})")]
    Negative(Decimal),
    /// The amount does not fit in `DECIMAL(10,2)`.
    #[error("price must be at most {max} (got {amount})")]
    TooLarge {
        /// Largest accepted amount.
        max: Decimal,
        /// Rejected amount.
        amount: Decimal,
    },
}

/// A product price.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopwise_core::Price;
///
/// let price = Price::new(Decimal::new(19_995, 3)).unwrap();
/// assert_eq!(price.to_string(), "20.00");
/// assert!(Price::new(Decimal::new(-1, 2)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Number of fractional digits kept.
    pub const SCALE: u32 = 2;

    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest price: `99_999_999.99`.
    // Mantissa 9_999_999_999 split into (lo, mid, hi) words; `Decimal::new` is not const.
    pub const MAX: Self = Self(Decimal::from_parts(0x540B_E3FF, 2, 0, false, 2));

    /// Create a price, rounding to two places.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] when the rounded amount is below zero,
    /// [`PriceError::TooLarge`] when it exceeds [`Price::MAX`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let mut rounded =
            amount.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        if rounded > Self::MAX.0 {
            return Err(PriceError::TooLarge {
                max: Self::MAX.0,
                amount,
            });
        }
        // Normalises -0.00 and widens 5 to 5.00.
        rounded = rounded.abs();
        rounded.rescale(Self::SCALE);
        Ok(Self(rounded))
    }

    /// Create a price from a count of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] when `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, Self::SCALE))
    }

    /// The amount in currency units.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero_is_allowed() {
        let price = Price::new(Decimal::ZERO).unwrap();
        assert_eq!(price, Price::ZERO);
        assert_eq!(price.to_string(), "0.00");
    }

    #[test]
    fn test_negative_is_rejected() {
        let err = Price::new(Decimal::from_str("-0.01").unwrap()).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::from_str("-0.01").unwrap()));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let price = Price::new(Decimal::from_str("10.005").unwrap()).unwrap();
        assert_eq!(price.amount(), Decimal::from_str("10.01").unwrap());

        let price = Price::new(Decimal::from_str("10.004").unwrap()).unwrap();
        assert_eq!(price.amount(), Decimal::from_str("10.00").unwrap());
    }

    #[test]
    fn test_tiny_negative_rounds_to_zero() {
        let price = Price::new(Decimal::from_str("-0.001").unwrap()).unwrap();
        assert_eq!(price.to_string(), "0.00");
    }

    #[test]
    fn test_precision_limit() {
        assert_eq!(Price::MAX.to_string(), "99999999.99");
        assert_eq!(Price::new(Price::MAX.amount()).unwrap(), Price::MAX);
        assert_eq!(
            Price::new(Decimal::from_str("99999999.994").unwrap()).unwrap(),
            Price::MAX
        );

        let err = Price::new(Decimal::from_str("100000000.00").unwrap()).unwrap_err();
        assert!(matches!(err, PriceError::TooLarge { .. }));
        assert!(Price::new(Decimal::MAX).is_err());
        assert!(serde_json::from_str::<Price>("\"10000000000000000000000000000\"").is_err());
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(120_000).unwrap();
        assert_eq!(price.to_string(), "1200.00");
        assert!(Price::from_cents(-5).is_err());
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let price = Price::from_cents(7_500).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"75.00\"");

        let parsed: Price = serde_json::from_str("\"75\"").unwrap();
        assert_eq!(parsed, price);
        assert!(serde_json::from_str::<Price>("\"-3\"").is_err());
    }
}
