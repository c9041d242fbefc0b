//! Domain enums and bounded values: order status, product category, review rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created in [`OrderStatus::PendingPayment`] and move forward
/// through fulfillment:
///
/// ```text
/// pending_payment -> processing -> shipped -> delivered
/// ```
///
/// `Cancelled` is reachable from any non-terminal state. `Delivered` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PendingPayment,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Stable string form used in the database and in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further transitions are allowed from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Forward progress only, one step at a time; cancellation is allowed
    /// from any non-terminal state.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::PendingPayment, Self::Processing)
            | (Self::Processing, Self::Shipped)
            | (Self::Shipped, Self::Delivered) => true,
            (from, Self::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`OrderStatus`] from its string form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown order status: {0}")]
pub struct OrderStatusParseError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(Self::PendingPayment),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(OrderStatusParseError(other.to_owned())),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Feminine,
    Masculine,
    Unisex,
}

impl Category {
    /// Stable string form used in the database and in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feminine => "feminine",
            Self::Masculine => "masculine",
            Self::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Category`] from its string form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feminine" => Ok(Self::Feminine),
            "masculine" => Ok(Self::Masculine),
            "unisex" => Ok(Self::Unisex),
            other => Err(CategoryParseError(other.to_owned())),
        }
    }
}

/// Error constructing a [`Rating`] from an out-of-range value.
#[derive(thiserror::Error, Debug, Clone)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingError(pub i32);

/// A review rating, guaranteed to be in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i16);

impl Rating {
    /// Create a rating, rejecting values outside `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError`] if `value` is out of range.
    pub fn new(value: i32) -> Result<Self, RatingError> {
        if (1..=5).contains(&value) {
            #[allow(clippy::cast_possible_truncation)]
            Ok(Self(value as i16))
        } else {
            Err(RatingError(value))
        }
    }

    /// Get the underlying value.
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_forward_transitions() {
        assert!(OrderStatus::PendingPayment.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_status_no_skipping() {
        assert!(!OrderStatus::PendingPayment.can_transition_to(OrderStatus::Shipped));
        assert!(!OrderStatus::PendingPayment.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_status_no_backwards() {
        assert!(!OrderStatus::Processing.can_transition_to(OrderStatus::PendingPayment));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Shipped));
    }

    #[test]
    fn test_status_cancel_from_non_terminal() {
        assert!(OrderStatus::PendingPayment.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::PendingPayment.is_terminal());
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            OrderStatus::PendingPayment,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(OrderStatus::from_str("paid").is_err());
    }

    #[test]
    fn test_status_serde_matches_as_str() {
        let json = serde_json::to_string(&OrderStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");
    }

    #[test]
    fn test_category_roundtrip() {
        assert_eq!(Category::from_str("unisex").unwrap(), Category::Unisex);
        assert!(Category::from_str("Unisex").is_err());
    }

    #[test]
    fn test_rating_bounds_inclusive() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert!(Rating::new(6).is_err());
    }

    #[test]
    fn test_rating_value() {
        assert_eq!(Rating::new(4).unwrap().as_i16(), 4);
    }
}
