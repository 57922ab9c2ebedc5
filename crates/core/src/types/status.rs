//! Order status.
//!
//! The schema restricts `orders.status` with
//! `CHECK (status IN ('Pending', 'Shipped', 'Delivered', 'Cancelled'))`.
//! Modelling it as a closed enum means a stored order can only ever hold one
//! of those four values; free-form text is rejected at the parse boundary.

use serde::{Deserialize, Serialize};

/// Error returned when text does not name a known status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid order status: {0:?} (expected Pending, Shipped, Delivered or Cancelled)")]
pub struct StatusError(pub String);

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Shipped, Self::Delivered, Self::Cancelled];

    /// The value stored in the `status` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| StatusError(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_any_case() {
        assert_eq!("Pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!(" DELIVERED ".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!("cancelled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "Returned".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err, StatusError("Returned".to_string()));
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_display_matches_column_value() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_serde_uses_column_value() {
        let json = serde_json::to_string(&OrderStatus::Delivered).unwrap();
        assert_eq!(json, "\"Delivered\"");
    }
}
