//! Bearer-token authentication.
//!
//! Resolves the `Authorization: Bearer <token>` header to an optional
//! [`CurrentUser`] before GraphQL execution. A missing, malformed, or
//! expired token degrades to an anonymous request rather than failing the
//! transport: each guarded operation then rejects with `UNAUTHENTICATED`,
//! while public operations (catalog browsing, sign-in) keep working.

use axum::http::{HeaderMap, header};

use tamarind_core::UserId;

use crate::services::auth::JwtKeys;

/// The authenticated caller for the duration of one request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    /// Verified user id from the bearer token.
    pub id: UserId,
}

/// Resolve the request's bearer token to a user, if any.
#[must_use]
pub fn current_user(keys: &JwtKeys, headers: &HeaderMap) -> Option<CurrentUser> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;

    match keys.verify(token) {
        Ok(id) => Some(CurrentUser { id }),
        Err(err) => {
            tracing::debug!(error = %err, "Rejected bearer token");
            None
        }
    }
}
