//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use parfum_core::{OrderId, OrderStatus, VariantId};

/// One line of an order.
///
/// Quantity and unit price are snapshots taken at checkout time; later
/// variant price changes do not affect existing orders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub variant_id: VariantId,
    pub quantity: i32,
    pub price: Decimal,
}

/// An order with its items attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}
