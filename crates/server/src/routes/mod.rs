//! HTTP route handlers for the store API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/health               - Health check
//!
//! # Catalog
//! GET    /api/products             - List products
//! POST   /api/products             - Create product (201)
//! PUT    /api/products/{id}        - Partial update
//! DELETE /api/products/{id}        - Delete (idempotent)
//!
//! # Sales ledger
//! GET    /api/sales                - List sales
//! POST   /api/sales                - Record a sale (201)
//!
//! # Payout settings
//! GET    /api/payout               - Current payout record or null
//! POST   /api/payout               - Replace payout record
//!
//! # Checkout
//! POST   /api/paypal/create-order  - Create provider order
//! POST   /api/paypal/capture-order - Capture order, record sale
//! POST   /api/cards/charge         - Card charge stub (demo only)
//!
//! # Users & roles
//! GET    /api/users                - List users (credentials omitted)
//! POST   /api/users/role           - Upsert a user's role
//! DELETE /api/users                - Purge all users except admin
//! POST   /api/users/register       - Register (201)
//! POST   /api/users/login          - Login
//!
//! # Configuration
//! GET    /api/config               - Current store config
//! POST   /api/config               - Merge partial config
//! ```

pub mod checkout;
pub mod payout;
pub mod products;
pub mod sales;
pub mod settings;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::error::Json;
use crate::state::AppState;

/// Maximum accepted request body size (1 MiB).
const BODY_LIMIT: usize = 1024 * 1024;

/// Health check response.
#[derive(Debug, Serialize)]
struct Health {
    ok: bool,
}

/// Liveness health check endpoint.
async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

/// Create the catalog routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            axum::routing::put(products::update).delete(products::remove),
        )
}

/// Create the sales ledger routes router.
pub fn sales_routes() -> Router<AppState> {
    Router::new().route("/", get(sales::index).post(sales::record))
}

/// Create the payout routes router.
pub fn payout_routes() -> Router<AppState> {
    Router::new().route("/", get(payout::show).post(payout::set))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/paypal/create-order", post(checkout::create_order))
        .route("/paypal/capture-order", post(checkout::capture_order))
        .route("/cards/charge", post(checkout::charge_card))
}

/// Create the user and role routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).delete(users::purge))
        .route("/role", post(users::set_role))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
}

/// Create the configuration routes router.
pub fn config_routes() -> Router<AppState> {
    Router::new().route("/", get(settings::show).post(settings::set))
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/sales", sales_routes())
        .nest("/payout", payout_routes())
        .merge(checkout_routes())
        .nest("/users", user_routes())
        .nest("/config", config_routes())
}

/// Build the application router with its middleware stack.
///
/// CORS is permissive because the storefront SPA is served from another
/// origin; the body limit mirrors the 1 MiB cap the API has always had.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
