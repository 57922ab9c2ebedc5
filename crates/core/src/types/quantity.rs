//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a quantity is rejected.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// Zero or negative.
    #[error("quantity must be positive (got {0})")]
    NotPositive(i32),
}

/// How many units of a product a line item carries. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Column default for `order_details.quantity`.
    pub const ONE: Self = Self(1);

    /// # Errors
    ///
    /// Returns [`QuantityError::NotPositive`] for values `<= 0`.
    pub const fn new(value: i32) -> Result<Self, QuantityError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(QuantityError::NotPositive(value))
        }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default().get(), 1);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(Quantity::new(0), Err(QuantityError::NotPositive(0)));
        assert_eq!(Quantity::new(-3), Err(QuantityError::NotPositive(-3)));
        assert_eq!(Quantity::new(2).unwrap().get(), 2);
    }

    #[test]
    fn test_deserialize_validates() {
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().get(), 4);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
