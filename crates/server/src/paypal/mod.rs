//! PayPal REST API client for checkout.
//!
//! Implements the two-phase order flow: client-credential token exchange,
//! order creation, and order capture. Responses come back as raw JSON so
//! provider payloads can be surfaced to the caller verbatim. All calls
//! share one HTTP client with a 10 second timeout; failed calls are never
//! retried here - the caller may resubmit.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use outfitter_core::Money;

use crate::config::PayPalConfig;

/// Timeout for each outbound provider call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to PayPal.
#[derive(Debug, Error)]
pub enum PayPalError {
    /// Client id/secret were not configured; checkout is unavailable.
    #[error("Missing PayPal credentials")]
    MissingCredentials,

    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token exchange came back non-2xx.
    #[error("token exchange failed with status {0}")]
    Oauth(u16),

    /// The provider rejected an order call; `payload` is its response
    /// body, passed through to the client verbatim.
    #[error("provider rejected the request with status {status}")]
    Rejected {
        status: u16,
        payload: serde_json::Value,
    },

    /// The provider returned a body that is not JSON.
    #[error("parse error: {0}")]
    Parse(String),
}

/// OAuth token response; only the access token is used.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

struct Credentials {
    client_id: String,
    client_secret: SecretString,
}

/// Client for the PayPal Orders API.
pub struct PayPalClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl PayPalClient {
    /// Create a new PayPal client for the configured environment.
    ///
    /// Missing credentials do not fail construction - the server runs
    /// without checkout until they are provided - but every order call
    /// will return [`PayPalError::MissingCredentials`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &PayPalConfig) -> Result<Self, PayPalError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let credentials = match (&config.client_id, &config.client_secret) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.env.base_url().to_owned(),
            credentials,
        })
    }

    /// Whether order calls can authenticate at all.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    /// Obtain an access token via client-credential exchange.
    async fn access_token(&self) -> Result<String, PayPalError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(PayPalError::MissingCredentials)?;

        let auth = BASE64.encode(format!(
            "{}:{}",
            credentials.client_id,
            credentials.client_secret.expose_secret()
        ));

        let response = self
            .client
            .post(format!("{}/v1/oauth2/token", self.base_url))
            .header("Authorization", format!("Basic {auth}"))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = %status, "PayPal token exchange failed");
            return Err(PayPalError::Oauth(status.as_u16()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PayPalError::Parse(e.to_string()))?;
        Ok(token.access_token)
    }

    /// Create a capture-intent order.
    ///
    /// # Errors
    ///
    /// Returns [`PayPalError::Rejected`] with the provider's payload on a
    /// provider-side rejection, or a transport/parse error otherwise.
    pub async fn create_order(
        &self,
        amount: Money,
        currency: &str,
        description: Option<&str>,
    ) -> Result<serde_json::Value, PayPalError> {
        let token = self.access_token().await?;

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": currency,
                    "value": amount.to_value_string(),
                },
                "description": description,
            }],
        });

        let response = self
            .client
            .post(format!("{}/v2/checkout/orders", self.base_url))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        Self::json_or_rejection(response).await
    }

    /// Capture a previously approved order.
    ///
    /// # Errors
    ///
    /// Same policy as [`Self::create_order`].
    pub async fn capture_order(&self, order_id: &str) -> Result<serde_json::Value, PayPalError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(format!(
                "{}/v2/checkout/orders/{order_id}/capture",
                self.base_url
            ))
            .bearer_auth(&token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        Self::json_or_rejection(response).await
    }

    /// Read the response body as JSON, turning non-success statuses into
    /// [`PayPalError::Rejected`] carrying the provider payload.
    async fn json_or_rejection(
        response: reqwest::Response,
    ) -> Result<serde_json::Value, PayPalError> {
        let status = response.status();
        let text = response.text().await?;

        let payload: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                tracing::error!(
                    status = %status,
                    body = %text.chars().take(500).collect::<String>(),
                    "failed to parse PayPal response"
                );
                return Err(PayPalError::Parse(e.to_string()));
            }
            // A non-JSON error body still gets surfaced
            Err(_) => serde_json::json!({ "error": text }),
        };

        if !status.is_success() {
            return Err(PayPalError::Rejected {
                status: status.as_u16(),
                payload,
            });
        }

        Ok(payload)
    }
}

/// Whether a capture response indicates a completed payment: an explicit
/// `COMPLETED` status or the presence of purchase-unit data.
#[must_use]
pub fn capture_succeeded(capture: &serde_json::Value) -> bool {
    if capture.get("status").and_then(serde_json::Value::as_str) == Some("COMPLETED") {
        return true;
    }
    capture
        .get("purchase_units")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|units| !units.is_empty())
}

/// Extract the captured amount from a capture response
/// (`purchase_units[0].payments.captures[0].amount.value`).
#[must_use]
pub fn captured_total(capture: &serde_json::Value) -> Option<Money> {
    let value = capture
        .get("purchase_units")?
        .get(0)?
        .get("payments")?
        .get("captures")?
        .get(0)?
        .get("amount")?
        .get("value")?
        .as_str()?;
    Money::parse(value).ok()
}
