//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::graphql::{self, StorefrontSchema};
use crate::services::auth::JwtKeys;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool, token keys, and the built
/// GraphQL schema.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    keys: JwtKeys,
    schema: StorefrontSchema,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Derives the token keys from configuration and builds the GraphQL
    /// schema with its shared data.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let keys = JwtKeys::new(&config.jwt_secret, config.token_ttl_seconds);
        let schema = graphql::build_schema(pool.clone(), keys.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                keys,
                schema,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token signing keys.
    #[must_use]
    pub fn keys(&self) -> &JwtKeys {
        &self.inner.keys
    }

    /// Get a reference to the executable GraphQL schema.
    #[must_use]
    pub fn schema(&self) -> &StorefrontSchema {
        &self.inner.schema
    }
}
