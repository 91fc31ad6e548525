//! Cart repository.
//!
//! The cart is a per-user mapping from product to quantity, unique per
//! `(user_id, product_id)`. Adds are accumulating upserts so concurrent
//! requests never lose an update; checkout clears the cart inside the order
//! transaction (see [`super::orders`]).

use sqlx::PgPool;

use tamarind_core::{CartItemId, ProductId, UserId};

use super::{ProductRepository, RepositoryError};
use crate::models::{CartItem, CartLine};

const CART_COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart items for a user, joined with product detail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if a cart row references a missing
    /// product (the foreign key makes this unreachable in a healthy store).
    pub async fn items_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {CART_COLUMNS} FROM cart_items WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        self.attach_products(items).await
    }

    /// Add a product to the cart, accumulating quantity.
    ///
    /// If an entry for `(user, product)` exists its quantity is incremented
    /// by `quantity` (never overwritten); otherwise a new entry is inserted.
    /// The upsert is atomic with respect to concurrent callers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartItem, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "INSERT INTO cart_items (id, user_id, product_id, quantity)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, product_id)
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
             RETURNING {CART_COLUMNS}"
        ))
        .bind(CartItemId::generate())
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(item)
    }

    /// Set (not increment) the quantity of an existing entry.
    ///
    /// Returns `None` if the user has no entry for this product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(&format!(
            "UPDATE cart_items SET quantity = $1
             WHERE user_id = $2 AND product_id = $3
             RETURNING {CART_COLUMNS}"
        ))
        .bind(quantity)
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Remove an entry from the cart.
    ///
    /// Idempotent: succeeds whether or not the entry existed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Join cart items with their products.
    async fn attach_products(
        &self,
        items: Vec<CartItem>,
    ) -> Result<Vec<CartLine>, RepositoryError> {
        let ids: Vec<ProductId> = items.iter().map(|i| i.product_id).collect();
        let mut products = ProductRepository::new(self.pool).map_by_id(&ids).await?;

        items
            .into_iter()
            .map(|item| {
                let product = products.remove(&item.product_id).ok_or_else(|| {
                    RepositoryError::DataCorruption(format!(
                        "cart item {} references missing product {}",
                        item.id, item.product_id
                    ))
                })?;
                Ok(CartLine { item, product })
            })
            .collect()
    }
}
