//! End-to-end tests for Outfitter.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with a throwaway data directory
//! DATA_DIR=$(mktemp -d) cargo run -p outfitter-server
//!
//! # Run the ignored end-to-end tests against it
//! cargo test -p outfitter-integration-tests -- --ignored
//! ```
//!
//! Tests target `OUTFITTER_BASE_URL` (default `http://localhost:3001`)
//! and assume a freshly seeded store. Checkout tests additionally need
//! sandbox PayPal credentials in the server's environment.

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("OUTFITTER_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}
