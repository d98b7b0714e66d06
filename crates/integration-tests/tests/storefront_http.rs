//! Integration tests for the JSON surface, driven through the axum router.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tower::ServiceExt;

use tidepool_integration_tests::app_state;
use tidepool_storefront::routes;

fn app() -> Router {
    routes::routes().with_state(app_state())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_shopping_session() {
    let app = app();
    let creds = json!({"username": "marina", "password": "reef"});

    let (status, body) = call(&app, Method::POST, "/cart/add", Some(json!({"name": "Koi", "price": "₱1,500"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["redirect"], "index.html#loginModal");

    let (status, _) = call(&app, Method::POST, "/auth/register", Some(creds.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::POST, "/auth/login", Some(creds)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "shop.html");

    for _ in 0..2 {
        let (status, _) = call(&app, Method::POST, "/cart/add", Some(json!({"name": "Koi", "price": 1500}))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = call(&app, Method::GET, "/cart", None).await;
    assert_eq!(body["data"]["items"][0]["label"], "Koi x2");
    assert_eq!(body["data"]["total"], "Total: ₱3000");

    let (status, body) = call(&app, Method::POST, "/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notices"][0]["title"], "Thank You");

    let (status, _) = call(&app, Method::POST, "/checkout", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = call(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(body["data"]["label"], "👤 marina");
}

#[tokio::test]
async fn test_buy_round_trip_with_prompt() {
    let app = app();
    let creds = json!({"username": "marina", "password": "reef"});
    call(&app, Method::POST, "/auth/register", Some(creds.clone())).await;
    call(&app, Method::POST, "/auth/login", Some(creds)).await;

    let (_, body) = call(&app, Method::POST, "/buy", Some(json!({"name": "Koi", "price": "₱1,500"}))).await;
    assert_eq!(body["data"]["confirmed"], false);
    assert_eq!(body["data"]["prompt"], "Buy \"Koi\" for ₱1500?");

    let (_, body) = call(
        &app,
        Method::POST,
        "/buy",
        Some(json!({"name": "Koi", "price": "₱1,500", "confirm": true})),
    )
    .await;
    assert_eq!(body["data"]["confirmed"], true);
    assert_eq!(body["notices"][0]["title"], "Purchase Complete");
}

#[tokio::test]
async fn test_contact_without_endpoint() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/contact",
        Some(json!({"name": "Ana", "email": "ana@example.com", "message": "Hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["notices"][0]["kind"], "error");
}

#[tokio::test]
async fn test_add_past_price_range_keeps_server_usable() {
    let app = app();
    let creds = json!({"username": "marina", "password": "reef"});
    call(&app, Method::POST, "/auth/register", Some(creds.clone())).await;
    call(&app, Method::POST, "/auth/login", Some(creds)).await;

    let whale = json!({"name": "Whale Shark", "price": "50,000,000,000,000,000,000,000,000,000"});
    let (status, _) = call(&app, Method::POST, "/cart/add", Some(whale.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::POST, "/cart/add", Some(whale)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["notices"][0]["kind"], "warn");

    let (status, body) = call(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["label"], "👤 marina");

    let (status, body) = call(&app, Method::GET, "/cart", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["label"], "Whale Shark x1");

    let (status, _) = call(&app, Method::POST, "/checkout", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_nav_rules() {
    let app = app();

    let (status, body) = call(&app, Method::GET, "/nav/active?href=faq.html&path=/site/faq.html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["active"], true);

    let (_, body) = call(&app, Method::GET, "/nav/transition?href=https://example.com", None).await;
    assert!(body["data"]["target"].is_null());

    let (_, body) = call(&app, Method::GET, "/nav/transition?href=shop.html&context=page", None).await;
    assert_eq!(body["data"]["target"], "shop.html");
}
