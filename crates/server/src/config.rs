//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3001)
//! - `DATA_DIR` - Directory holding the JSON store (default: data)
//! - `ADMIN_EMAIL` - Seeded admin account email (default: admin@admin.com)
//! - `ADMIN_PASS` - Seeded admin account password (default: admin12)
//! - `LOGO_URL` - Branding logo applied to the store config when unset
//! - `PAYPAL_ENV` - `live` or `sandbox` (default: sandbox)
//! - `PAYPAL_CLIENT_ID` - PayPal REST client id
//! - `PAYPAL_CLIENT_SECRET` - PayPal REST client secret
//!
//! The admin credentials default to demo values so a fresh checkout runs
//! out of the box; checkout endpoints fail with a configuration error
//! until the PayPal credentials are provided.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

use outfitter_core::Email;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory containing the JSON store document
    pub data_dir: PathBuf,
    /// Email of the seeded admin account (lowercase-canonical)
    pub admin_email: Email,
    /// Password the admin account is (re)seeded with at startup
    pub admin_pass: SecretString,
    /// Branding logo applied to the store config when none is set
    pub logo_url: Option<String>,
    /// PayPal REST API configuration
    pub paypal: PayPalConfig,
}

/// PayPal REST API configuration.
///
/// Implements `Debug` manually to redact the client secret.
#[derive(Clone)]
pub struct PayPalConfig {
    /// Which PayPal environment to talk to
    pub env: PayPalEnv,
    /// OAuth client id (checkout is unavailable without it)
    pub client_id: Option<String>,
    /// OAuth client secret (checkout is unavailable without it)
    pub client_secret: Option<SecretString>,
}

/// PayPal environment selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPalEnv {
    #[default]
    Sandbox,
    Live,
}

impl PayPalEnv {
    /// API base URL for this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-m.sandbox.paypal.com",
            Self::Live => "https://api-m.paypal.com",
        }
    }
}

impl std::fmt::Debug for PayPalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayPalConfig")
            .field("env", &self.env)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid
    /// (unparseable host, port, or admin email).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_owned(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("DATA_DIR", "data"));

        let admin_email = Email::parse(&get_env_or_default("ADMIN_EMAIL", "admin@admin.com"))
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_EMAIL".to_owned(), e.to_string()))?;
        let admin_pass = SecretString::from(get_env_or_default("ADMIN_PASS", "admin12"));
        let logo_url = get_optional_env("LOGO_URL");

        Ok(Self {
            host,
            port,
            data_dir,
            admin_email,
            admin_pass,
            logo_url,
            paypal: PayPalConfig::from_env(),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PayPalConfig {
    fn from_env() -> Self {
        let env = match get_optional_env("PAYPAL_ENV").as_deref() {
            Some("live") => PayPalEnv::Live,
            _ => PayPalEnv::Sandbox,
        };

        Self {
            env,
            client_id: get_optional_env("PAYPAL_CLIENT_ID"),
            client_secret: get_optional_env("PAYPAL_CLIENT_SECRET").map(SecretString::from),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
