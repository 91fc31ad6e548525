//! Query resolvers.

use async_graphql::{Context, ID, Object, Result};
use sqlx::PgPool;

use tamarind_core::{OrderId, ProductId};

use crate::db::{CartRepository, OrderRepository, ProductRepository, UserRepository};
use crate::error::ApiError;

use super::require_user;
use super::types::{CartItem, Order, Product, User};

/// Root query object.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The caller's user record, or null when browsing anonymously.
    ///
    /// Absence is a valid state, never an error.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let Some(current) = ctx.data_opt::<crate::middleware::CurrentUser>() else {
            return Ok(None);
        };

        let pool = ctx.data::<PgPool>()?;
        let user = UserRepository::new(pool)
            .get_by_id(current.id)
            .await
            .map_err(ApiError::from)?;

        Ok(user.map(User::from))
    }

    /// The catalog, optionally filtered by category.
    ///
    /// `"All"` is a sentinel meaning unfiltered, same as omitting the
    /// argument.
    async fn products(
        &self,
        ctx: &Context<'_>,
        category: Option<String>,
    ) -> Result<Vec<Product>> {
        let pool = ctx.data::<PgPool>()?;
        let repo = ProductRepository::new(pool);

        let products = match category.as_deref() {
            Some(category) if category != "All" => {
                repo.list_by_category(category).await.map_err(ApiError::from)?
            }
            _ => repo.list_all().await.map_err(ApiError::from)?,
        };

        Ok(products.into_iter().map(Product::from).collect())
    }

    /// A single product, or null if absent.
    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        let Ok(product_id) = id.parse::<ProductId>() else {
            return Ok(None);
        };

        let pool = ctx.data::<PgPool>()?;
        let product = ProductRepository::new(pool)
            .get_by_id(product_id)
            .await
            .map_err(ApiError::from)?;

        Ok(product.map(Product::from))
    }

    /// The caller's orders, newest first.
    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let current = require_user(ctx)?;

        let pool = ctx.data::<PgPool>()?;
        let orders = OrderRepository::new(pool)
            .list_for_user(current.id)
            .await
            .map_err(ApiError::from)?;

        Ok(orders.into_iter().map(Order::from).collect())
    }

    /// One of the caller's orders by ID.
    ///
    /// Null when the order does not exist or belongs to another user; the
    /// two are indistinguishable, so order existence never leaks.
    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Order>> {
        let current = require_user(ctx)?;

        let Ok(order_id) = id.parse::<OrderId>() else {
            return Ok(None);
        };

        let pool = ctx.data::<PgPool>()?;
        let order = OrderRepository::new(pool)
            .get_for_user(order_id, current.id)
            .await
            .map_err(ApiError::from)?;

        Ok(order.map(Order::from))
    }

    /// The caller's cart, joined with product details as of now.
    async fn cart(&self, ctx: &Context<'_>) -> Result<Vec<CartItem>> {
        let current = require_user(ctx)?;

        let pool = ctx.data::<PgPool>()?;
        let lines = CartRepository::new(pool)
            .items_for_user(current.id)
            .await
            .map_err(ApiError::from)?;

        Ok(lines.into_iter().map(CartItem::from).collect())
    }
}
