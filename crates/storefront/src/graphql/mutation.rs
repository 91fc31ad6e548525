//! Mutation resolvers.

use async_graphql::{Context, ID, Object, Result};
use sqlx::PgPool;

use tamarind_core::{OrderId, ProductId};

use crate::db::{CartRepository, OrderRepository, ProductRepository};
use crate::error::ApiError;
use crate::services::auth::{AuthService, JwtKeys};

use super::require_user;
use super::types::{
    AuthPayload, CartItem, Order, OrderStatus, SignInInput, SignUpInput, User,
};

/// Root mutation object.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create an account and sign in, in one step.
    async fn sign_up(&self, ctx: &Context<'_>, input: SignUpInput) -> Result<AuthPayload> {
        let pool = ctx.data::<PgPool>()?;
        let keys = ctx.data::<JwtKeys>()?;

        let (user, token) = AuthService::new(pool, keys)
            .register(&input.name, &input.email, &input.password)
            .await
            .map_err(ApiError::from)?;

        Ok(AuthPayload {
            token,
            user: User::from(user),
        })
    }

    /// Sign in with email and password.
    async fn sign_in(&self, ctx: &Context<'_>, input: SignInInput) -> Result<AuthPayload> {
        let pool = ctx.data::<PgPool>()?;
        let keys = ctx.data::<JwtKeys>()?;

        let (user, token) = AuthService::new(pool, keys)
            .authenticate(&input.email, &input.password)
            .await
            .map_err(ApiError::from)?;

        Ok(AuthPayload {
            token,
            user: User::from(user),
        })
    }

    /// Add a product to the caller's cart.
    ///
    /// If an entry already exists its quantity is incremented by `quantity`,
    /// never overwritten. Quantity must be positive.
    async fn add_to_cart(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
        quantity: i32,
    ) -> Result<CartItem> {
        let current = require_user(ctx)?;

        if quantity <= 0 {
            return Err(ApiError::InvalidQuantity.into());
        }

        let product_id = product_id
            .parse::<ProductId>()
            .map_err(|_| ApiError::NotFound("product"))?;

        let pool = ctx.data::<PgPool>()?;
        let item = CartRepository::new(pool)
            .add(current.id, product_id, quantity)
            .await
            .map_err(ApiError::from)?;

        let product = ProductRepository::new(pool)
            .get_by_id(item.product_id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::NotFound("product"))?;

        Ok(CartItem::from(crate::models::CartLine { item, product }))
    }

    /// Set (not increment) a cart entry's quantity.
    ///
    /// A quantity of zero or less removes the entry and returns null. Null is
    /// also returned when the caller has no entry for this product.
    async fn update_cart_item(
        &self,
        ctx: &Context<'_>,
        product_id: ID,
        quantity: i32,
    ) -> Result<Option<CartItem>> {
        let current = require_user(ctx)?;

        let Ok(product_id) = product_id.parse::<ProductId>() else {
            return Ok(None);
        };

        let pool = ctx.data::<PgPool>()?;
        let repo = CartRepository::new(pool);

        if quantity <= 0 {
            repo.remove(current.id, product_id)
                .await
                .map_err(ApiError::from)?;
            return Ok(None);
        }

        let Some(item) = repo
            .set_quantity(current.id, product_id, quantity)
            .await
            .map_err(ApiError::from)?
        else {
            return Ok(None);
        };

        let product = ProductRepository::new(pool)
            .get_by_id(item.product_id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::NotFound("product"))?;

        Ok(Some(CartItem::from(crate::models::CartLine {
            item,
            product,
        })))
    }

    /// Remove a product from the caller's cart.
    ///
    /// Idempotent: succeeds even when no entry existed.
    async fn remove_from_cart(&self, ctx: &Context<'_>, product_id: ID) -> Result<bool> {
        let current = require_user(ctx)?;

        let Ok(product_id) = product_id.parse::<ProductId>() else {
            return Ok(true);
        };

        let pool = ctx.data::<PgPool>()?;
        CartRepository::new(pool)
            .remove(current.id, product_id)
            .await
            .map_err(ApiError::from)?;

        Ok(true)
    }

    /// Check out the caller's cart into a new order.
    ///
    /// All-or-nothing: the order, its frozen line prices, and the cart clear
    /// commit as one transaction. Fails with `EMPTY_CART` when there is
    /// nothing to buy — including when a concurrent checkout got there first.
    async fn create_order(&self, ctx: &Context<'_>) -> Result<Order> {
        let current = require_user(ctx)?;

        let pool = ctx.data::<PgPool>()?;
        let repo = OrderRepository::new(pool);

        let order = repo
            .create_from_cart(current.id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::EmptyCart)?;

        let detail = repo
            .get_for_user(order.id, current.id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::NotFound("order"))?;

        Ok(Order::from(detail))
    }

    /// Change the status of one of the caller's orders.
    ///
    /// Only the owner may transition an order, and only along the legal
    /// edges (`PENDING -> FULFILLED`, `PENDING -> CANCELLED`). A non-owner
    /// sees the same `NOT_FOUND` as a nonexistent order.
    async fn update_order_status(
        &self,
        ctx: &Context<'_>,
        id: ID,
        status: OrderStatus,
    ) -> Result<Order> {
        let current = require_user(ctx)?;

        let order_id = id
            .parse::<OrderId>()
            .map_err(|_| ApiError::NotFound("order"))?;

        let pool = ctx.data::<PgPool>()?;
        let repo = OrderRepository::new(pool);

        let detail = repo
            .get_for_user(order_id, current.id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::NotFound("order"))?;

        let from = detail.order.status;
        let to = status.into();

        if !from.can_transition_to(to) {
            return Err(ApiError::InvalidStatusTransition { from, to }.into());
        }

        // Compare-and-set: a concurrent transition makes this a no-op.
        repo.transition_status(order_id, current.id, from, to)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::InvalidStatusTransition { from, to })?;

        let updated = repo
            .get_for_user(order_id, current.id)
            .await
            .map_err(ApiError::from)?
            .ok_or(ApiError::NotFound("order"))?;

        Ok(Order::from(updated))
    }
}
