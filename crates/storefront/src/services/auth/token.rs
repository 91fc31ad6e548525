//! Stateless bearer tokens.
//!
//! Tokens are HS256 JWTs asserting a user id. The signing secret is explicit
//! process-wide configuration; there is no server-side revocation, so a token
//! stays valid until its `exp` passes. Verification is pure computation and
//! safe for unlimited concurrent use.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tamarind_core::UserId;

use super::AuthError;

/// JWT claim set: subject (user id), issued-at, expiry.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    iat: i64,
    exp: i64,
}

/// Signing and verification keys for bearer tokens.
///
/// Built once at startup from the configured secret and shared across
/// requests. Implements `Clone` cheaply; deliberately does not implement
/// `Debug` so the key material cannot leak into logs.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl JwtKeys {
    /// Derive keys from the configured secret.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_seconds: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            ttl_seconds,
        }
    }

    /// Issue a signed token asserting `user_id`, valid for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenIssue` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.as_uuid(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| AuthError::TokenIssue)
    }

    /// Verify a token and return the user id it asserts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` when the token is malformed, the
    /// signature does not verify, or the token has expired.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_keys(ttl_seconds: i64) -> JwtKeys {
        let secret = SecretString::from("k7mRw2pXq9ZtB4vN8cJdL0gYhF6aUeSi");
        JwtKeys::new(&secret, ttl_seconds)
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let keys = test_keys(3600);
        let user_id = UserId::generate();

        let token = keys.issue(user_id).unwrap();
        let verified = keys.verify(&token).unwrap();

        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let keys = test_keys(3600);
        assert!(matches!(
            keys.verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let keys = test_keys(3600);
        let other = JwtKeys::new(
            &SecretString::from("aB3xY9mK2nL5pQ7rT0uW4zC6eF8gH1jD"),
            3600,
        );

        let token = keys.issue(UserId::generate()).unwrap();
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_expired() {
        // Issued already past its expiry, beyond the default leeway.
        let keys = test_keys(-3600);
        let token = keys.issue(UserId::generate()).unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let keys = test_keys(3600);
        let token = keys.issue(UserId::generate()).unwrap();

        // Flip a character in the payload segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let payload = parts.get_mut(1).unwrap();
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.replace_range(payload.len() - 1.., flipped);

        let tampered = parts.join(".");
        assert!(matches!(
            keys.verify(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }
}
