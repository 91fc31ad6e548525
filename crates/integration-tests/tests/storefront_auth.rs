//! Integration tests for sign-up, sign-in, and token handling.
//!
//! These tests require a running storefront server and a migrated database.
//! See the crate docs for setup, then run with `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::json;

use tamarind_integration_tests::{error_code, graphql, sign_up, unique_email};

const PASSWORD: &str = "correct horse battery";

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_sign_up_returns_token_and_user() {
    let client = Client::new();
    let email = unique_email("signup");

    let (token, user) = sign_up(&client, "Test User", &email, PASSWORD).await;

    assert!(!token.is_empty());
    assert_eq!(user["email"], email);
    assert_eq!(user["name"], "Test User");

    // The token must verify back to the same user
    let body = graphql(&client, Some(&token), r"{ me { id email } }", json!({})).await;
    assert_eq!(body["data"]["me"]["id"], user["id"]);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_sign_up_duplicate_email_fails() {
    let client = Client::new();
    let email = unique_email("dup");

    sign_up(&client, "First User", &email, PASSWORD).await;

    let body = graphql(
        &client,
        None,
        r"
        mutation SignUp($input: SignUpInput!) {
            signUp(input: $input) { token }
        }
        ",
        json!({ "input": { "name": "Second User", "email": email, "password": PASSWORD } }),
    )
    .await;

    assert_eq!(error_code(&body), Some("EMAIL_TAKEN"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_sign_up_rejects_short_password() {
    let client = Client::new();

    let body = graphql(
        &client,
        None,
        r"
        mutation SignUp($input: SignUpInput!) {
            signUp(input: $input) { token }
        }
        ",
        json!({ "input": { "name": "Weak Password", "email": unique_email("weak"), "password": "short" } }),
    )
    .await;

    assert_eq!(error_code(&body), Some("BAD_USER_INPUT"));
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_sign_in_with_correct_password() {
    let client = Client::new();
    let email = unique_email("signin");
    let (_, user) = sign_up(&client, "Sign In", &email, PASSWORD).await;

    let body = graphql(
        &client,
        None,
        r"
        mutation SignIn($input: SignInInput!) {
            signIn(input: $input) {
                token
                user { id }
            }
        }
        ",
        json!({ "input": { "email": email, "password": PASSWORD } }),
    )
    .await;

    assert!(body["errors"].is_null());
    assert_eq!(body["data"]["signIn"]["user"]["id"], user["id"]);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_sign_in_failures_are_indistinguishable() {
    let client = Client::new();
    let email = unique_email("wrongpw");
    sign_up(&client, "Wrong Password", &email, PASSWORD).await;

    let sign_in = r"
        mutation SignIn($input: SignInInput!) {
            signIn(input: $input) { token }
        }
    ";

    // Wrong password for an existing account
    let wrong_password = graphql(
        &client,
        None,
        sign_in,
        json!({ "input": { "email": email, "password": "not the password" } }),
    )
    .await;

    // Unknown email entirely
    let unknown_email = graphql(
        &client,
        None,
        sign_in,
        json!({ "input": { "email": unique_email("ghost"), "password": PASSWORD } }),
    )
    .await;

    assert_eq!(error_code(&wrong_password), Some("INVALID_CREDENTIALS"));
    assert_eq!(error_code(&unknown_email), Some("INVALID_CREDENTIALS"));
    assert_eq!(
        wrong_password["errors"][0]["message"],
        unknown_email["errors"][0]["message"],
        "messages must not reveal whether the email exists"
    );
}

// ============================================================================
// Tokens
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_me_is_null_for_anonymous() {
    let client = Client::new();

    let body = graphql(&client, None, r"{ me { id } }", json!({})).await;

    assert!(body["errors"].is_null(), "anonymous me must not error");
    assert!(body["data"]["me"].is_null());
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_invalid_token_degrades_to_anonymous() {
    let client = Client::new();

    let body = graphql(
        &client,
        Some("garbage.token.value"),
        r"{ me { id } }",
        json!({}),
    )
    .await;

    assert!(body["errors"].is_null());
    assert!(body["data"]["me"].is_null());
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_guarded_query_requires_auth() {
    let client = Client::new();

    let body = graphql(&client, None, r"{ orders { id } }", json!({})).await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
}
