//! API error handling.
//!
//! Every operation surfaces failures as [`ApiError`], which converts into a
//! GraphQL error carrying a machine-readable `code` extension. Clients key
//! behavior off the code, never the message text. Internal errors (database,
//! hashing, signing) are logged server-side and never leak detail to the
//! client.

use async_graphql::ErrorExtensions;
use thiserror::Error;

use tamarind_core::OrderStatus;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Domain errors surfaced by the Commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Operation requires authentication and the caller has none.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Unknown email or wrong password, indistinguishably.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Sign-up email is already registered.
    #[error("Email already in use")]
    EmailTaken,

    /// Checkout attempted with no cart entries.
    #[error("Cart is empty")]
    EmptyCart,

    /// Referenced entity does not exist (or is not visible to the caller).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Cart quantity must be a positive integer.
    #[error("Quantity must be a positive integer")]
    InvalidQuantity,

    /// Requested order status change is not a legal transition.
    #[error("Cannot change order status from {from} to {to}")]
    InvalidStatusTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Request input failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// Unexpected server-side failure; detail stays in the logs.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Machine-readable error code exposed in the GraphQL `extensions`.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::EmptyCart => "EMPTY_CART",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::InvalidInput(_) => "BAD_USER_INPUT",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("product"),
            RepositoryError::Conflict(msg) => Self::InvalidInput(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(e) => Self::InvalidInput(e.to_string()),
            AuthError::InvalidName(msg) | AuthError::WeakPassword(msg) => Self::InvalidInput(msg),
            AuthError::EmailTaken => Self::EmailTaken,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::InvalidToken => Self::Unauthenticated,
            AuthError::Repository(e) => Self::from(e),
            AuthError::TokenIssue | AuthError::PasswordHash => Self::Internal(err.to_string()),
        }
    }
}

impl From<ApiError> for async_graphql::Error {
    fn from(err: ApiError) -> Self {
        if let ApiError::Internal(ref detail) = err {
            tracing::error!(error = %detail, "Request error");
        }

        let code = err.code();
        Self::new(err.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthenticated.code(), "UNAUTHENTICATED");
        assert_eq!(ApiError::EmailTaken.code(), "EMAIL_TAKEN");
        assert_eq!(ApiError::EmptyCart.code(), "EMPTY_CART");
        assert_eq!(ApiError::NotFound("product").code(), "NOT_FOUND");
        assert_eq!(ApiError::InvalidQuantity.code(), "INVALID_QUANTITY");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::Internal("connection refused on 10.0.0.3".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_auth_error_mapping() {
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).code(),
            "INVALID_CREDENTIALS"
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidToken).code(),
            "UNAUTHENTICATED"
        );
        assert_eq!(ApiError::from(AuthError::EmailTaken).code(), "EMAIL_TAKEN");
    }

    #[test]
    fn test_repository_error_mapping() {
        assert_eq!(
            ApiError::from(RepositoryError::NotFound).code(),
            "NOT_FOUND"
        );
        assert_eq!(
            ApiError::from(RepositoryError::DataCorruption("bad row".into())).code(),
            "INTERNAL"
        );
    }

    #[test]
    fn test_graphql_error_carries_code_extension() {
        let gql: async_graphql::Error = ApiError::EmptyCart.into();
        assert_eq!(gql.message, "Cart is empty");

        let extensions = gql.extensions.expect("extensions set");
        assert!(format!("{extensions:?}").contains("EMPTY_CART"));
    }
}
