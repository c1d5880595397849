//! API DTOs (Data Transfer Objects)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Grid paging query (`?page=1&rows=20`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub rows: Option<u32>,
}

/// Signed-in user's account summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: String,
    pub int_user_id: String,
    pub card_no: String,
    /// Serialized as a string to keep the exact decimal
    pub fee_rate: Decimal,
}
