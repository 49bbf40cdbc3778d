//! Outfitter Server - storefront and admin console API.
//!
//! Serves the community store's HTTP JSON API: product catalog, sales
//! ledger, payout settings, user/role management, store configuration,
//! and PayPal checkout. State lives in a single JSON document under
//! `DATA_DIR`; access is serialized so concurrent requests cannot lose
//! updates.

#![cfg_attr(not(test), forbid(unsafe_code))]

use outfitter_server::config::ServerConfig;
use outfitter_server::paypal::PayPalClient;
use outfitter_server::routes;
use outfitter_server::services::{ConfigService, IdentityService};
use outfitter_server::state::AppState;
use outfitter_server::store::Store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "outfitter_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open (and on first run initialize) the JSON document store
    let store = Store::open(&config.data_dir)
        .await
        .expect("Failed to open store");
    tracing::info!(path = %config.data_dir.display(), "Store opened");

    // Seed the admin account; idempotent per email, resets the password
    // and forces the role back to admin on every start
    IdentityService::new(&store, &config.admin_email)
        .seed_admin(&config.admin_pass)
        .await
        .expect("Failed to seed admin account");
    tracing::info!(admin = %config.admin_email, "Admin account seeded");

    // One-way branding default: only applied while no logo is configured
    if let Some(logo_url) = &config.logo_url {
        ConfigService::new(&store)
            .apply_branding_default(logo_url)
            .await
            .expect("Failed to apply branding default");
    }

    let paypal = PayPalClient::new(&config.paypal).expect("Failed to build PayPal client");
    if !paypal.is_configured() {
        tracing::warn!("PayPal credentials not configured; checkout endpoints will fail");
    }

    // Build application state and router
    let addr = config.socket_addr();
    let state = AppState::new(config, store, paypal);
    let app = routes::router(state);

    // Start server
    tracing::info!("outfitter listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
