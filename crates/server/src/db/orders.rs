//! Order repository.
//!
//! Checkout writes (order header, items, payment ID) take a `PgConnection`
//! so they run inside the caller's transaction; reads go through the pool.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use parfum_core::{OrderId, OrderStatus, UserId, VariantId};

use super::RepositoryError;
use crate::models::{Order, OrderItem};

/// A row from the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    status: String,
    total: Decimal,
    payment_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "invalid order status in database: {}",
                self.status
            ))
        })?;

        Ok(Order {
            id: OrderId::new(self.id),
            status,
            total: self.total,
            payment_id: self.payment_id,
            created_at: self.created_at,
            items,
        })
    }
}

/// A row from `order_items`, keyed by owning order.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: i32,
    variant_id: i32,
    quantity: i32,
    price: Decimal,
}

/// Insert an order header in `pending_payment`, returning its ID.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn create_order(
    conn: &mut PgConnection,
    user_id: UserId,
    total: Decimal,
) -> Result<OrderId, RepositoryError> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO orders (user_id, status, total) \
         VALUES ($1, $2, $3) \
         RETURNING id",
    )
    .bind(user_id.as_i32())
    .bind(OrderStatus::PendingPayment.as_str())
    .bind(total)
    .fetch_one(&mut *conn)
    .await?;

    Ok(OrderId::new(id))
}

/// Insert one order line with its price snapshot.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn add_item(
    conn: &mut PgConnection,
    order_id: OrderId,
    variant_id: VariantId,
    quantity: i32,
    price: Decimal,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "INSERT INTO order_items (order_id, variant_id, quantity, price) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(order_id.as_i32())
    .bind(variant_id.as_i32())
    .bind(quantity)
    .bind(price)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Attach the gateway's payment ID to an order.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the order does not exist.
pub async fn set_payment_id(
    conn: &mut PgConnection,
    order_id: OrderId,
    payment_id: &str,
) -> Result<(), RepositoryError> {
    let result = sqlx::query("UPDATE orders SET payment_id = $2, updated_at = NOW() WHERE id = $1")
        .bind(order_id.as_i32())
        .bind(payment_id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Repository for order reads and webhook-driven status updates.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's orders, newest first, with items attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails or a stored status is
    /// invalid.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, status, total, payment_id, created_at \
             FROM orders \
             WHERE user_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT order_id, variant_id, quantity, price \
             FROM order_items \
             WHERE order_id = ANY($1) \
             ORDER BY id ASC",
        )
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: std::collections::HashMap<i32, Vec<OrderItem>> =
            std::collections::HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItem {
                    variant_id: VariantId::new(item.variant_id),
                    quantity: item.quantity,
                    price: item.price,
                });
        }

        rows.into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect()
    }

    /// Move an order from `pending_payment` to `processing`, but only if the
    /// payment ID matches and the order is still awaiting payment.
    ///
    /// Returns `false` when nothing matched, which covers an unknown order,
    /// a mismatched payment ID, and a replayed notification alike. Replays
    /// are a no-op by construction: the first delivery consumes the
    /// `pending_payment` state the guard requires.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_processing_if_pending(
        &self,
        order_id: OrderId,
        payment_id: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders \
             SET status = $3, updated_at = NOW() \
             WHERE id = $1 AND payment_id = $2 AND status = $4",
        )
        .bind(order_id.as_i32())
        .bind(payment_id)
        .bind(OrderStatus::Processing.as_str())
        .bind(OrderStatus::PendingPayment.as_str())
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
