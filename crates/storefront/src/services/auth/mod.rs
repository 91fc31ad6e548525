//! Authentication service.
//!
//! Password registration and sign-in, plus bearer-token issuance and
//! verification. Sign-in failure never reveals whether the email exists:
//! unknown email and wrong password both surface as `InvalidCredentials`.

mod error;
mod token;

pub use error::AuthError;
pub use token::JwtKeys;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tamarind_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Display name length bounds.
const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 50;

/// Authentication service.
///
/// Handles registration, sign-in, and token verification.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    keys: &'a JwtKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, keys: &'a JwtKeys) -> Self {
        Self {
            users: UserRepository::new(pool),
            keys,
        }
    }

    /// Register a new user and issue a token bound to them.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidName` / `InvalidEmail` / `WeakPassword` if
    /// input validation fails, and `AuthError::EmailTaken` if the email is
    /// already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let name = validate_name(name)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let token = self.keys.issue(user.id)?;
        Ok((user, token))
    }

    /// Sign in with email and password, issuing a fresh token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a
    /// wrong password, indistinguishably.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(User, String), AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let (user, password_hash) = self
            .users
            .get_with_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.keys.issue(user.id)?;
        Ok((user, token))
    }

    /// Verify a bearer token and return the user id it asserts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token is malformed,
    /// tampered with, or expired.
    pub fn verify_token(&self, token: &str) -> Result<UserId, AuthError> {
        self.keys.verify(token)
    }
}

/// Validate a display name, returning it trimmed.
fn validate_name(name: &str) -> Result<&str, AuthError> {
    let trimmed = name.trim();
    if trimmed.len() < MIN_NAME_LENGTH {
        return Err(AuthError::InvalidName(format!(
            "name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(AuthError::InvalidName(format!(
            "name cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
///
/// The comparison runs through Argon2's verifier, which is constant-time with
/// respect to the stored hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
