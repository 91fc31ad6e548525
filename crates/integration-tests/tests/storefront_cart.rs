//! Integration tests for cart operations.
//!
//! These tests require a running storefront server, a migrated database,
//! and a seeded catalog. See the crate docs for setup, then run with
//! `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{Value, json};

use tamarind_integration_tests::{error_code, graphql, seeded_products, sign_up, unique_email};

const PASSWORD: &str = "correct horse battery";

const ADD_TO_CART: &str = r"
    mutation Add($productId: ID!, $quantity: Int!) {
        addToCart(productId: $productId, quantity: $quantity) {
            quantity
            product { id }
        }
    }
";

const CART: &str = r"{ cart { quantity product { id name price } } }";

async fn fresh_user(client: &Client) -> String {
    let (token, _) = sign_up(client, "Cart User", &unique_email("cart"), PASSWORD).await;
    token
}

fn first_product_id(products: &[Value]) -> String {
    products[0]["id"].as_str().expect("product id").to_string()
}

// ============================================================================
// Add to cart
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_add_to_cart_accumulates_quantity() {
    let client = Client::new();
    let token = fresh_user(&client).await;
    let product_id = first_product_id(&seeded_products(&client).await);

    let first = graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 2 }),
    )
    .await;
    assert_eq!(first["data"]["addToCart"]["quantity"], 2);

    // Second add increments, never overwrites
    let second = graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 3 }),
    )
    .await;
    assert_eq!(second["data"]["addToCart"]["quantity"], 5);

    // Still a single cart line
    let cart = graphql(&client, Some(&token), CART, json!({})).await;
    let items = cart["data"]["cart"].as_array().expect("cart array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 5);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_add_to_cart_rejects_non_positive_quantity() {
    let client = Client::new();
    let token = fresh_user(&client).await;
    let product_id = first_product_id(&seeded_products(&client).await);

    for quantity in [0, -1] {
        let body = graphql(
            &client,
            Some(&token),
            ADD_TO_CART,
            json!({ "productId": product_id, "quantity": quantity }),
        )
        .await;
        assert_eq!(error_code(&body), Some("INVALID_QUANTITY"));
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_add_to_cart_unknown_product_is_not_found() {
    let client = Client::new();
    let token = fresh_user(&client).await;

    let body = graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": uuid::Uuid::new_v4().to_string(), "quantity": 1 }),
    )
    .await;

    assert_eq!(error_code(&body), Some("NOT_FOUND"));
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_add_to_cart_requires_auth() {
    let client = Client::new();
    let product_id = first_product_id(&seeded_products(&client).await);

    let body = graphql(
        &client,
        None,
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 1 }),
    )
    .await;

    assert_eq!(error_code(&body), Some("UNAUTHENTICATED"));
}

// ============================================================================
// Update & remove
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_update_cart_item_sets_quantity() {
    let client = Client::new();
    let token = fresh_user(&client).await;
    let product_id = first_product_id(&seeded_products(&client).await);

    graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 4 }),
    )
    .await;

    let body = graphql(
        &client,
        Some(&token),
        r"
        mutation Update($productId: ID!, $quantity: Int!) {
            updateCartItem(productId: $productId, quantity: $quantity) { quantity }
        }
        ",
        json!({ "productId": product_id, "quantity": 2 }),
    )
    .await;

    // Set, not add: 4 -> 2
    assert_eq!(body["data"]["updateCartItem"]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_update_cart_item_to_zero_removes_entry() {
    let client = Client::new();
    let token = fresh_user(&client).await;
    let product_id = first_product_id(&seeded_products(&client).await);

    graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 1 }),
    )
    .await;

    let body = graphql(
        &client,
        Some(&token),
        r"
        mutation Update($productId: ID!, $quantity: Int!) {
            updateCartItem(productId: $productId, quantity: $quantity) { quantity }
        }
        ",
        json!({ "productId": product_id, "quantity": 0 }),
    )
    .await;

    assert!(body["errors"].is_null());
    assert!(body["data"]["updateCartItem"].is_null());

    let cart = graphql(&client, Some(&token), CART, json!({})).await;
    assert_eq!(cart["data"]["cart"].as_array().expect("cart array").len(), 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server and PostgreSQL"]
async fn test_remove_from_cart_is_idempotent() {
    let client = Client::new();
    let token = fresh_user(&client).await;
    let product_id = first_product_id(&seeded_products(&client).await);

    let remove = r"
        mutation Remove($productId: ID!) {
            removeFromCart(productId: $productId)
        }
    ";

    // Removing an entry that never existed still succeeds
    let body = graphql(
        &client,
        Some(&token),
        remove,
        json!({ "productId": product_id }),
    )
    .await;
    assert!(body["errors"].is_null());
    assert_eq!(body["data"]["removeFromCart"], true);

    // And removing twice after an add succeeds both times
    graphql(
        &client,
        Some(&token),
        ADD_TO_CART,
        json!({ "productId": product_id, "quantity": 1 }),
    )
    .await;

    for _ in 0..2 {
        let body = graphql(
            &client,
            Some(&token),
            remove,
            json!({ "productId": product_id }),
        )
        .await;
        assert_eq!(body["data"]["removeFromCart"], true);
    }
}
