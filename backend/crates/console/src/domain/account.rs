//! Account Entity
//!
//! Billing data keyed by the internal account id.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub int_user_id: String,
    pub card_no: String,
    /// Fee charged per trade, as a fraction (0.003 = 0.3%)
    pub fee_rate: Decimal,
}
