//! The Commerce API: GraphQL schema over the stores and auth service.
//!
//! Resolvers pull the connection pool and signing keys out of schema data;
//! the per-request [`CurrentUser`](crate::middleware::CurrentUser) is
//! injected by the HTTP handler after bearer-token verification. Guarded
//! operations fail with an `UNAUTHENTICATED` error code when it is absent.

pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{Context, EmptySubscription, Schema};
use sqlx::PgPool;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::auth::JwtKeys;

/// The executable storefront schema.
pub type StorefrontSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with its shared data (pool, signing keys).
#[must_use]
pub fn build_schema(pool: PgPool, keys: JwtKeys) -> StorefrontSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(pool)
        .data(keys)
        .finish()
}

/// Resolve the authenticated caller, or fail with `UNAUTHENTICATED`.
pub(crate) fn require_user(ctx: &Context<'_>) -> Result<CurrentUser, ApiError> {
    ctx.data_opt::<CurrentUser>()
        .copied()
        .ok_or(ApiError::Unauthenticated)
}
