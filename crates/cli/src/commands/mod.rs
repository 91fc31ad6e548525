//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Storefront database URL from the environment.
///
/// Reads `STOREFRONT_DATABASE_URL`, falling back to the generic
/// `DATABASE_URL`.
pub(crate) fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    if let Ok(value) = std::env::var("STOREFRONT_DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err("STOREFRONT_DATABASE_URL not set".into())
}
