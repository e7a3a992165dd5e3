//! Order Models

use bazaar::{cart::CartLineItem, orders::OrderStatus};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable record of a completed checkout.
///
/// Created exactly once per checkout and never mutated by this client
/// afterwards; status transitions happen server-side or through an
/// administrative path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Line items at placement time.
    pub items: Vec<CartLineItem>,

    /// Total price at placement time.
    pub total_price: Decimal,

    /// Lifecycle status; always `pending` at creation.
    pub status: OrderStatus,

    /// Creation time, persisted as a millisecond timestamp.
    #[serde(with = "timestamp_millis")]
    pub created_at: Timestamp,

    /// Cart owner that placed the order: a user id or the guest bucket.
    pub owner: String,
}

/// Millisecond-integer wire format for order timestamps.
mod timestamp_millis {
    use jiff::Timestamp;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub(super) fn serialize<S: Serializer>(
        timestamp: &Timestamp,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(timestamp.as_millisecond())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Timestamp, D::Error> {
        let millis = i64::deserialize(deserializer)?;

        Timestamp::from_millisecond(millis).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn timestamps_round_trip_as_milliseconds() -> TestResult {
        let order = Order {
            items: Vec::new(),
            total_price: Decimal::ZERO,
            status: OrderStatus::Pending,
            created_at: Timestamp::from_millisecond(1_700_000_000_123)?,
            owner: "guest".to_string(),
        };

        let encoded = serde_json::to_value(&order)?;

        assert_eq!(encoded["created_at"], serde_json::json!(1_700_000_000_123_i64));
        assert_eq!(encoded["status"], serde_json::json!("pending"));

        let decoded: Order = serde_json::from_value(encoded)?;

        assert_eq!(decoded, order);

        Ok(())
    }
}
