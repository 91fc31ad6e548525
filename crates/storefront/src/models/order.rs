//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use tamarind_core::{OrderId, OrderItemId, OrderStatus, ProductId, UserId};

use super::product::Product;

/// An order header: a frozen snapshot of a cart at purchase time.
///
/// `total` is computed once at creation and never recomputed; only `status`
/// (and `updated_at`) change afterwards.
#[derive(Debug, Clone, FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order.
///
/// `price` is the unit price copied from the product at purchase time, not a
/// reference to the live catalog.
#[derive(Debug, Clone, FromRow)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order item joined with its product detail.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub item: OrderItem,
    pub product: Product,
}

/// An order with its lines, as returned to the API.
#[derive(Debug, Clone)]
pub struct OrderDetail {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}
