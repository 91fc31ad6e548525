//! Cart domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use tamarind_core::{CartItemId, ProductId, UserId};

use super::product::Product;

/// One row of a user's cart: a product and how many of it.
///
/// Unique per `(user_id, product_id)`; quantity is always positive (a
/// non-positive update deletes the row instead).
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cart item joined with its product detail, as returned to the API.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub product: Product,
}
