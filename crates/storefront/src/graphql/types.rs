//! GraphQL wire types and their conversions from domain models.
//!
//! The wire schema mirrors the API surface: `User` never carries the
//! password hash, `OrderItem.price` is the frozen purchase-time copy, and
//! order statuses are a closed enum rather than free-form strings.

use async_graphql::{Enum, ID, InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tamarind_core::OrderStatus as DomainOrderStatus;

use crate::models;

/// A registered user.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            id: ID(user.id.to_string()),
            name: user.name,
            email: user.email.into_inner(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, SimpleObject)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::Product> for Product {
    fn from(product: models::Product) -> Self {
        Self {
            id: ID(product.id.to_string()),
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            category: product.category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// One entry of the caller's cart, joined with product detail.
#[derive(Debug, Clone, SimpleObject)]
pub struct CartItem {
    pub id: ID,
    pub quantity: i32,
    pub product: Product,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::CartLine> for CartItem {
    fn from(line: models::CartLine) -> Self {
        Self {
            id: ID(line.item.id.to_string()),
            quantity: line.item.quantity,
            product: Product::from(line.product),
            created_at: line.item.created_at,
            updated_at: line.item.updated_at,
        }
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum OrderStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

impl From<DomainOrderStatus> for OrderStatus {
    fn from(status: DomainOrderStatus) -> Self {
        match status {
            DomainOrderStatus::Pending => Self::Pending,
            DomainOrderStatus::Fulfilled => Self::Fulfilled,
            DomainOrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<OrderStatus> for DomainOrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => Self::Pending,
            OrderStatus::Fulfilled => Self::Fulfilled,
            OrderStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// One line of an order; `price` is the unit price frozen at purchase time.
#[derive(Debug, Clone, SimpleObject)]
pub struct OrderItem {
    pub id: ID,
    pub quantity: i32,
    pub price: Decimal,
    pub product: Product,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::OrderLine> for OrderItem {
    fn from(line: models::OrderLine) -> Self {
        Self {
            id: ID(line.item.id.to_string()),
            quantity: line.item.quantity,
            price: line.item.price,
            product: Product::from(line.product),
            created_at: line.item.created_at,
            updated_at: line.item.updated_at,
        }
    }
}

/// An order: a frozen snapshot of a cart at purchase time.
#[derive(Debug, Clone, SimpleObject)]
pub struct Order {
    pub id: ID,
    pub user_id: ID,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<models::OrderDetail> for Order {
    fn from(detail: models::OrderDetail) -> Self {
        Self {
            id: ID(detail.order.id.to_string()),
            user_id: ID(detail.order.user_id.to_string()),
            items: detail.lines.into_iter().map(OrderItem::from).collect(),
            total: detail.order.total,
            status: OrderStatus::from(detail.order.status),
            created_at: detail.order.created_at,
            updated_at: detail.order.updated_at,
        }
    }
}

/// Result of a successful sign-up or sign-in.
#[derive(Debug, Clone, SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Sign-up input.
#[derive(Debug, InputObject)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in input.
#[derive(Debug, InputObject)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            DomainOrderStatus::Pending,
            DomainOrderStatus::Fulfilled,
            DomainOrderStatus::Cancelled,
        ] {
            let wire = OrderStatus::from(status);
            assert_eq!(DomainOrderStatus::from(wire), status);
        }
    }

    #[test]
    fn test_user_conversion_drops_nothing_visible() {
        let user = models::User {
            id: tamarind_core::UserId::generate(),
            name: "Jane Doe".to_string(),
            email: tamarind_core::Email::parse("jane@example.com").expect("valid email"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = user.id.to_string();

        let wire = User::from(user);
        assert_eq!(wire.id.as_str(), id);
        assert_eq!(wire.email, "jane@example.com");
    }
}
