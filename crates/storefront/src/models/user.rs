//! User domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use tamarind_core::{Email, UserId};

/// A storefront user.
///
/// The password hash never leaves the repository layer; this type is safe to
/// hand to the API surface.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name given at sign-up.
    pub name: String,
    /// User's email address (unique across users).
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
