//! Order repository.
//!
//! Checkout is the one multi-statement transaction in the storefront. The
//! whole sequence (read cart, compute total, write order, write lines, clear
//! cart) commits or rolls back as a unit, so a crash or a concurrent
//! double-submit can never leave a half-applied order. Cart rows are read
//! `FOR UPDATE`: the loser of a double-submit blocks on the winner's locks,
//! re-reads an empty cart after the winner commits, and creates nothing.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use tamarind_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::{ProductRepository, RepositoryError};
use crate::models::{Order, OrderDetail, OrderItem, OrderLine};

const ORDER_COLUMNS: &str = "id, user_id, status, total, created_at, updated_at";
const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, price, created_at, updated_at";

/// A cart row with the product's current price, read under lock at checkout.
#[derive(FromRow)]
struct CheckoutLine {
    product_id: ProductId,
    quantity: i32,
    price: Decimal,
}

/// Total owed for a set of checkout lines: Σ (unit price × quantity).
fn order_total(lines: &[CheckoutLine]) -> Decimal {
    lines
        .iter()
        .map(|line| line.price * Decimal::from(line.quantity))
        .sum()
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from the user's current cart, atomically.
    ///
    /// Reads the cart under row locks, freezes each line's unit price as of
    /// this instant, writes the order and its lines, and clears the cart —
    /// all in one transaction. Returns `None` when the cart is empty
    /// (including when a concurrent checkout emptied it first).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and no state changes.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let lines = sqlx::query_as::<_, CheckoutLine>(
            "SELECT ci.product_id, ci.quantity, p.price
             FROM cart_items ci
             JOIN products p ON p.id = ci.product_id
             WHERE ci.user_id = $1
             ORDER BY ci.created_at
             FOR UPDATE OF ci",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            tx.rollback().await?;
            return Ok(None);
        }

        let total = order_total(&lines);

        let order = sqlx::query_as::<_, Order>(&format!(
            "INSERT INTO orders (id, user_id, total)
             VALUES ($1, $2, $3)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(OrderId::generate())
        .bind(user_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, quantity, price)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(OrderItemId::generate())
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(order))
    }

    /// All orders for a user, newest first, with lines attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_lines(orders).await
    }

    /// Get one of the user's orders by ID, with lines attached.
    ///
    /// Returns `None` when the order does not exist *or* belongs to another
    /// user — callers cannot distinguish the two, so order existence never
    /// leaks across accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        id: OrderId,
        user_id: UserId,
    ) -> Result<Option<OrderDetail>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let mut details = self.attach_lines(vec![order]).await?;
        Ok(details.pop())
    }

    /// Move an order from `from` to `to`, compare-and-set style.
    ///
    /// The UPDATE is guarded by the previously observed status, so a
    /// concurrent transition loses cleanly: `None` means the order is gone,
    /// owned by someone else, or no longer in `from`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn transition_status(
        &self,
        id: OrderId,
        user_id: UserId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $1
             WHERE id = $2 AND user_id = $3 AND status = $4
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(to)
        .bind(id)
        .bind(user_id)
        .bind(from)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Load lines for a batch of orders and attach product detail.
    async fn attach_lines(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderDetail>, RepositoryError> {
        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id.as_uuid()).collect();

        let items = sqlx::query_as::<_, OrderItem>(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY created_at"
        ))
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let product_ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let products = ProductRepository::new(self.pool).map_by_id(&product_ids).await?;

        let mut lines_by_order: HashMap<OrderId, Vec<OrderLine>> = HashMap::new();
        for item in items {
            let product = products.get(&item.product_id).cloned().ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "order item {} references missing product {}",
                    item.id, item.product_id
                ))
            })?;
            lines_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderLine { item, product });
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                OrderDetail { order, lines }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: ProductId, quantity: i32, price: Decimal) -> CheckoutLine {
        CheckoutLine {
            product_id,
            quantity,
            price,
        }
    }

    #[test]
    fn test_order_total() {
        let lines = vec![
            line(ProductId::generate(), 2, Decimal::new(10_00, 2)),
            line(ProductId::generate(), 1, Decimal::new(5_00, 2)),
        ];
        assert_eq!(order_total(&lines), Decimal::new(25_00, 2));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_order_total_keeps_cents_exact() {
        // 3 × 0.10 must be exactly 0.30, no float drift
        let lines = vec![line(ProductId::generate(), 3, Decimal::new(10, 2))];
        assert_eq!(order_total(&lines), Decimal::new(30, 2));
    }
}
