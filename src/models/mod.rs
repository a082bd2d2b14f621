pub mod enums;
pub mod ids;

use crate::models::enums::OrderStatus;
use crate::models::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One order-status notification as carried on the wire (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEvent {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderEvent {
    /// Field-level checks the JSON schema alone cannot express: the order id
    /// must be non-empty and the amount nonnegative.
    pub fn is_valid(&self) -> bool {
        !self.order_id.is_empty() && self.amount >= 0.0
    }
}
