//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

use tamarind_core::ProductId;

/// A catalog product.
///
/// Products are seeded via the CLI and read-only at runtime.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price; non-negative, enforced by the store.
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    /// Free-form category label (open set).
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for inserting a catalog product (seeding).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
}
