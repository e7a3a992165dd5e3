//! Currency

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Formats a decimal amount as a US-dollar display string.
pub fn format_usd(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::USD).to_string()
}
