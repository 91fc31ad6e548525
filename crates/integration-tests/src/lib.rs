//! Integration tests for Tamarind.
//!
//! # Running Tests
//!
//! These tests exercise the GraphQL API end-to-end and require:
//! - A running `PostgreSQL` database with migrations applied
//!   (`cargo run -p tamarind-cli -- migrate`)
//! - A seeded catalog (`cargo run -p tamarind-cli -- seed`)
//! - The storefront server running (`cargo run -p tamarind-storefront`)
//!
//! Then:
//!
//! ```bash
//! cargo test -p tamarind-integration-tests -- --ignored
//! ```
//!
//! The base URL defaults to `http://localhost:3000` and can be overridden
//! with `STOREFRONT_BASE_URL`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A unique email for test isolation.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", uuid::Uuid::new_v4())
}

/// Execute a GraphQL operation, optionally authenticated.
///
/// Returns the full response body (`data` + `errors`).
///
/// # Panics
///
/// Panics if the request cannot be sent or the response is not JSON — both
/// indicate a broken test environment rather than a failing assertion.
pub async fn graphql(
    client: &Client,
    token: Option<&str>,
    query: &str,
    variables: Value,
) -> Value {
    let url = format!("{}/api/graphql", storefront_base_url());

    let mut request = client
        .post(url)
        .json(&json!({ "query": query, "variables": variables }));

    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    let response = request.send().await.expect("Failed to send request");
    response.json().await.expect("Response was not JSON")
}

/// The `code` extension of the first GraphQL error, if any.
#[must_use]
pub fn error_code(body: &Value) -> Option<&str> {
    body["errors"][0]["extensions"]["code"].as_str()
}

/// Sign up a fresh user and return `(token, user)`.
///
/// # Panics
///
/// Panics if sign-up fails; callers rely on it as a fixture.
pub async fn sign_up(client: &Client, name: &str, email: &str, password: &str) -> (String, Value) {
    let body = graphql(
        client,
        None,
        r"
        mutation SignUp($input: SignUpInput!) {
            signUp(input: $input) {
                token
                user { id name email }
            }
        }
        ",
        json!({ "input": { "name": name, "email": email, "password": password } }),
    )
    .await;

    assert!(
        body["errors"].is_null(),
        "sign-up failed: {:?}",
        body["errors"]
    );

    let payload = &body["data"]["signUp"];
    let token = payload["token"].as_str().expect("token missing").to_string();
    (token, payload["user"].clone())
}

/// Fetch the seeded catalog; panics when it is empty.
///
/// # Panics
///
/// Panics if the catalog query fails or no products are seeded.
pub async fn seeded_products(client: &Client) -> Vec<Value> {
    let body = graphql(
        client,
        None,
        r"{ products { id name price category } }",
        json!({}),
    )
    .await;

    let products = body["data"]["products"]
        .as_array()
        .expect("products missing")
        .clone();
    assert!(
        !products.is_empty(),
        "catalog is empty - run `tam-cli seed` first"
    );
    products
}
