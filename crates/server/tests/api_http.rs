//! In-process HTTP tests driving the real router.
//!
//! Each test builds the full application (temp-dir store, seeded admin,
//! unconfigured PayPal client) and exercises it through `tower`'s
//! `oneshot` without binding a socket.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use outfitter_core::Email;
use outfitter_server::config::{PayPalConfig, PayPalEnv, ServerConfig};
use outfitter_server::paypal::PayPalClient;
use outfitter_server::routes;
use outfitter_server::services::IdentityService;
use outfitter_server::state::AppState;
use outfitter_server::store::Store;

const ADMIN_EMAIL: &str = "owner@store.test";
const ADMIN_PASS: &str = "admin12";

fn test_config(data_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        data_dir: data_dir.to_path_buf(),
        admin_email: Email::parse(ADMIN_EMAIL).unwrap(),
        admin_pass: SecretString::from(ADMIN_PASS),
        logo_url: None,
        paypal: PayPalConfig {
            env: PayPalEnv::Sandbox,
            client_id: None,
            client_secret: None,
        },
    }
}

/// Build the application the way `main` does, against a temp store.
async fn test_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    let store = Store::open(dir.path()).await.unwrap();
    IdentityService::new(&store, &config.admin_email)
        .seed_admin(&config.admin_pass)
        .await
        .unwrap();

    let paypal = PayPalClient::new(&config.paypal).unwrap();
    let state = AppState::new(config, store, paypal);
    (dir, routes::router(state))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let (_dir, app) = test_app().await;

    let response = app.oneshot(get_request("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!({ "ok": true }));
}

#[tokio::test]
async fn product_crud_flow() {
    let (_dir, app) = test_app().await;

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({ "name": "Patrol Kit", "price": 19.99, "tags": ["gear"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;
    let id = created["id"].as_str().unwrap().to_owned();
    assert_eq!(created["descShort"], "");

    // List preserves insertion order
    let response = app.clone().oneshot(get_request("/api/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = read_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Partial update merges fields
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/products/{id}"),
            json!({ "price": 25.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["name"], "Patrol Kit");
    assert_eq!(updated["price"], json!(25.0));
    assert_eq!(updated["tags"], json!(["gear"]));

    // Delete is idempotent
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({ "removed": true }));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/products/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(read_json(response).await, json!({ "removed": false }));
}

#[tokio::test]
async fn product_create_rejects_bad_input() {
    let (_dir, app) = test_app().await;

    // Missing price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({ "name": "Radio" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());

    // Non-numeric price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products",
            json!({ "name": "Radio", "price": "cheap" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json(response).await["error"].is_string());

    // The catalog is unchanged
    let response = app.oneshot(get_request("/api/products")).await.unwrap();
    assert_eq!(read_json(response).await, json!([]));
}

#[tokio::test]
async fn product_update_unknown_id_is_404() {
    let (_dir, app) = test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/products/no-such-id",
            json!({ "price": 1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_recording_trusts_caller() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/sales",
            json!({ "productId": "ghost", "productName": "Ghost", "total": 12.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let sale = read_json(response).await;
    assert!(sale["id"].as_str().is_some());
    assert!(sale["ts"].as_i64().is_some());

    let response = app.oneshot(get_request("/api/sales")).await.unwrap();
    assert_eq!(read_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn payout_set_replaces_wholesale() {
    let (_dir, app) = test_app().await;

    // Unset payout is null, not an error
    let response = app.clone().oneshot(get_request("/api/payout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, Value::Null);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/payout",
            json!({ "method": "paypal", "email": "a@b.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/payout",
            json!({ "method": "debit-account", "account": "123" }),
        ))
        .await
        .unwrap();
    let replaced = read_json(response).await;
    assert_eq!(replaced["method"], "debit-account");
    assert_eq!(replaced["account"], "123");
    assert_eq!(replaced["email"], Value::Null);

    // Unknown methods are rejected
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/payout",
            json!({ "method": "wire" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn user_registration_and_login() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            json!({ "name": "Ana", "email": "ana@example.com", "pass": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = read_json(response).await;
    assert_eq!(user["role"], "client");
    assert!(user.get("pass").is_none());

    // Duplicate registration conflicts; casing does not matter
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            json!({ "name": "Imposter", "email": "ANA@example.com", "pass": "other" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Login with any casing of the email
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({ "email": "Ana@Example.COM", "pass": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong password and unknown email return the same shape
    let wrong_pass = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({ "email": "ana@example.com", "pass": "wrong" }),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/login",
            json!({ "email": "nobody@example.com", "pass": "hunter2" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_pass.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        read_json(wrong_pass).await,
        read_json(unknown_email).await
    );
}

#[tokio::test]
async fn role_upsert_and_purge() {
    let (_dir, app) = test_app().await;

    // Role upsert creates a minimal account
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/role",
            json!({ "email": "mod@example.com", "role": "helper" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = read_json(response).await;
    assert_eq!(user["name"], "mod");
    assert_eq!(user["role"], "helper");

    // Unknown roles are rejected
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/role",
            json!({ "email": "mod@example.com", "role": "supreme-leader" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Purge keeps only the seeded admin, twice over
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(read_json(response).await, json!({ "remaining": 1 }));
    }

    let response = app.oneshot(get_request("/api/users")).await.unwrap();
    let users = read_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], ADMIN_EMAIL);
    assert_eq!(users[0]["role"], "admin");
}

#[tokio::test]
async fn config_merge_preserves_prior_fields() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/config",
            json!({ "fivemHost": "1.2.3.4", "currency": "USD" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/config",
            json!({ "currency": "EUR" }),
        ))
        .await
        .unwrap();
    let merged = read_json(response).await;
    assert_eq!(merged["fivemHost"], "1.2.3.4");
    assert_eq!(merged["currency"], "EUR");

    let response = app.oneshot(get_request("/api/config")).await.unwrap();
    let fetched = read_json(response).await;
    assert_eq!(fetched["fivemHost"], "1.2.3.4");
    assert_eq!(fetched["currency"], "EUR");
}

#[tokio::test]
async fn checkout_requires_amount_and_credentials() {
    let (_dir, app) = test_app().await;

    // Missing amount is a validation error
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/paypal/create-order", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With an amount but no provider credentials, checkout is a server fault
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/paypal/create-order",
            json!({ "amount": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        read_json(response).await,
        json!({ "error": "Missing PayPal credentials" })
    );

    // Capture requires an order id before any provider call
    let response = app
        .oneshot(json_request("POST", "/api/paypal/capture-order", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn card_charge_stub_approves_valid_requests() {
    let (_dir, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cards/charge",
            json!({ "amount": 10.0, "cardToken": "tok_visa" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let receipt = read_json(response).await;
    assert_eq!(receipt["status"], "APPROVED");
    assert!(receipt["id"].as_str().is_some());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cards/charge",
            json!({ "amount": 10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
