//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] tamarind_core::EmailError),

    /// Invalid display name.
    #[error("name validation failed: {0}")]
    InvalidName(String),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Email already registered.
    #[error("email already in use")]
    EmailTaken,

    /// Invalid credentials (unknown email or wrong password — callers must
    /// not be able to tell which).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, tampered with, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Token could not be signed.
    #[error("failed to issue token")]
    TokenIssue,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
