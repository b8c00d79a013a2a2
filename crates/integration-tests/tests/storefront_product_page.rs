//! Integration tests for the product detail page.
//!
//! These tests drive the real storefront router against a stub Shopify
//! GraphQL backend. The stub records every request body, so the tests can
//! verify the wire contract (selected options pass-through) alongside the
//! rendered pages.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use ride_storefront::config::{ShopifyStorefrontConfig, StorefrontConfig};
use ride_storefront::routes;
use ride_storefront::state::AppState;

/// Request bodies captured by the stub backend, in arrival order.
type Captured = Arc<Mutex<Vec<Value>>>;

/// Canned response for the `classic-tee` product: one variant, no
/// backend-resolved `selectedVariant`.
fn classic_tee_response(available_for_sale: bool) -> Value {
    json!({
        "data": {
            "product": {
                "id": "gid://shopify/Product/1",
                "title": "Classic Tee",
                "handle": "classic-tee",
                "vendor": "Ride",
                "description": "<p>The original Ride tee.</p>",
                "featuredImage": {
                    "id": "gid://shopify/ProductImage/9",
                    "url": "https://cdn.shopify.com/classic-tee.jpg",
                    "altText": null,
                    "height": 700,
                    "width": 700
                },
                "options": [{"name": "Size", "values": ["S", "M", "L"]}],
                "selectedVariant": null,
                "variants": {
                    "nodes": [{
                        "id": "gid://shopify/ProductVariant/41",
                        "title": "S",
                        "availableForSale": available_for_sale,
                        "price": {"currencyCode": "USD", "amount": "25.00"},
                        "compareAtPrice": null,
                        "selectedOptions": [{"name": "Size", "value": "S"}]
                    }]
                }
            }
        }
    })
}

async fn graphql_stub(State(captured): State<Captured>, Json(body): Json<Value>) -> Json<Value> {
    captured.lock().expect("capture lock").push(body.clone());

    let handle = body
        .get("variables")
        .and_then(|v| v.get("handle"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    match handle {
        "classic-tee" => Json(classic_tee_response(true)),
        "sold-out-tee" => Json(classic_tee_response(false)),
        _ => Json(json!({"data": {"product": null}})),
    }
}

/// Start the stub backend on an ephemeral port and return its address plus
/// the captured request bodies.
async fn start_stub_backend() -> (SocketAddr, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));

    let router = Router::new()
        .route("/api/2026-01/graphql.json", post(graphql_stub))
        .with_state(Arc::clone(&captured));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });

    (addr, captured)
}

/// Build the storefront router pointed at the stub backend.
async fn storefront_app() -> (Router, Captured) {
    let (addr, captured) = start_stub_backend().await;

    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("host"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        // No stories needed for the product page; an absent directory loads
        // an empty content store
        content_dir: PathBuf::from("/nonexistent/ride-content"),
        shopify: ShopifyStorefrontConfig {
            store: "ride-test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("shptka_9f8e7d6c5b4a3f2e"),
            api_endpoint: Some(format!("http://{addr}/api/2026-01/graphql.json")),
        },
        sentry_dsn: None,
    };

    let state = AppState::new(config).expect("app state");
    let app = Router::new().merge(routes::routes()).with_state(state);

    (app, captured)
}

async fn get(app: &Router, uri: &str) -> (axum::http::StatusCode, String) {
    let request = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    (status, String::from_utf8_lossy(&body).into_owned())
}

// =============================================================================
// Loader Scenarios
// =============================================================================

#[tokio::test]
async fn test_product_page_falls_back_to_first_variant() {
    let (app, _captured) = storefront_app().await;

    let (status, body) = get(&app, "/products/classic-tee").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert!(body.contains("Classic Tee"), "renders the product title");
    assert!(body.contains("$25"), "renders the fallback variant's price");
    // The fallback variant is orderable, so both affordances render
    assert!(body.contains("Add to cart"));
    assert!(body.contains("https://ride-test.myshopify.com/cart/41:1?payment=shop_pay"));
}

#[tokio::test]
async fn test_missing_product_is_404_with_empty_body() {
    let (app, _captured) = storefront_app().await;

    let (status, body) = get(&app, "/products/does-not-exist").await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert!(body.is_empty(), "404 carries an empty body, got: {body}");
}

#[tokio::test]
async fn test_unavailable_variant_omits_purchase_affordances() {
    let (app, _captured) = storefront_app().await;

    let (status, body) = get(&app, "/products/sold-out-tee").await;

    assert_eq!(status, axum::http::StatusCode::OK);
    assert!(body.contains("$25"), "price still renders");
    assert!(body.contains("The original Ride tee."), "description still renders");
    assert!(!body.contains("Add to cart"));
    assert!(!body.contains("shop_pay"));
}

// =============================================================================
// Wire Contract
// =============================================================================

#[tokio::test]
async fn test_query_parameters_pass_through_as_selected_options() {
    let (app, captured) = storefront_app().await;

    let (status, _body) = get(
        &app,
        "/products/classic-tee?Size=M&Color=Team%20Red&Size=L",
    )
    .await;
    assert_eq!(status, axum::http::StatusCode::OK);

    let bodies = captured.lock().expect("capture lock");
    let request = bodies.last().expect("one captured request");

    assert_eq!(request["variables"]["handle"], "classic-tee");

    // Same length and pairing as the incoming parameters, order preserved,
    // duplicates untouched
    assert_eq!(
        request["variables"]["selectedOptions"],
        json!([
            {"name": "Size", "value": "M"},
            {"name": "Color", "value": "Team Red"},
            {"name": "Size", "value": "L"}
        ])
    );
}

#[tokio::test]
async fn test_no_query_parameters_sends_empty_selected_options() {
    let (app, captured) = storefront_app().await;

    let (status, _body) = get(&app, "/products/classic-tee").await;
    assert_eq!(status, axum::http::StatusCode::OK);

    let bodies = captured.lock().expect("capture lock");
    let request = bodies.last().expect("one captured request");
    assert_eq!(request["variables"]["selectedOptions"], json!([]));
}
