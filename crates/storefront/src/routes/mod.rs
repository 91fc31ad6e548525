//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health         - Liveness check
//! GET  /health/ready   - Readiness check (verifies database connectivity)
//! POST /api/graphql    - The Commerce API
//! GET  /api/graphql    - GraphiQL explorer
//! ```

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
};

use crate::middleware;
use crate::state::AppState;

/// Create the storefront router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/api/graphql", get(graphiql).post(graphql_handler))
}

/// Execute a GraphQL request.
///
/// The bearer token (if any) is verified here and the resulting
/// [`middleware::CurrentUser`] injected into the request's data, so
/// resolvers never touch HTTP headers.
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Some(current) = middleware::current_user(state.keys(), &headers) {
        request = request.data(current);
    }

    state.schema().execute(request).await.into()
}

/// GraphiQL explorer for interactive use.
async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/api/graphql").finish())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
