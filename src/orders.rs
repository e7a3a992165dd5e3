//! Orders

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a placed order.
///
/// Storefront clients only ever create `Pending` orders; later transitions
/// happen server-side or through an administrative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Placed, not yet picked up for processing.
    Pending,

    /// Being prepared or shipped.
    Processing,

    /// Payment has been confirmed.
    PaymentCompleted,

    /// Cancelled before completion.
    Cancelled,
}

impl OrderStatus {
    /// Wire representation of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::PaymentCompleted => "payment-completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown order status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "payment-completed" => Ok(Self::PaymentCompleted),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn statuses_round_trip_through_strings() -> TestResult {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::PaymentCompleted,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn serde_uses_the_wire_strings() -> TestResult {
        let encoded = serde_json::to_string(&OrderStatus::PaymentCompleted)?;

        assert_eq!(encoded, "\"payment-completed\"");

        let decoded: OrderStatus = serde_json::from_str("\"pending\"")?;

        assert_eq!(decoded, OrderStatus::Pending);

        Ok(())
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = "refunded".parse::<OrderStatus>();

        assert_eq!(result, Err(UnknownOrderStatus("refunded".to_string())));
    }
}
