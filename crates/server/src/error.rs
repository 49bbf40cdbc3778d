//! Unified error handling for the API boundary.
//!
//! Provides a single `ApiError` type that every route handler returns.
//! Business-rule violations map to their HTTP status and a
//! `{ "error": ... }` JSON body; provider rejections pass the provider's
//! payload through verbatim; internal details are logged, never exposed.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::paypal::PayPalError;
use crate::store::StoreError;

/// Application-level error type for the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate resource (e.g. registering an existing email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad login. Unknown email and wrong password are indistinguishable.
    #[error("Invalid credentials")]
    Authentication,

    /// Payment provider operation failed.
    #[error("Payment provider error: {0}")]
    Provider(#[from] PayPalError),

    /// The JSON store is unreadable or corrupt.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Stable JSON error body: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server-side failures with full detail before scrubbing
        if matches!(self, Self::Store(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "Request error");
        }

        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Authentication => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials".to_owned(),
            ),
            Self::Provider(err) => return provider_response(err),
            // Don't expose internal error details to clients
            Self::Store(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_owned(),
            ),
        };

        (status, axum::Json(ErrorBody { error: message })).into_response()
    }
}

/// Map a payment provider failure to a response.
///
/// Provider-side rejections surface the provider's own JSON payload with a
/// 400 so the client sees exactly what the provider objected to. Missing
/// credentials and transport failures are server faults.
fn provider_response(err: PayPalError) -> Response {
    match err {
        PayPalError::Rejected { payload, status } => {
            tracing::warn!(%status, "payment provider rejected request");
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        PayPalError::MissingCredentials => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(ErrorBody {
                error: "Missing PayPal credentials".to_owned(),
            }),
        )
            .into_response(),
        err => {
            tracing::error!(error = %err, "payment provider call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ErrorBody {
                    error: "payment provider unavailable".to_owned(),
                }),
            )
                .into_response()
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// JSON extractor whose rejection is an [`ApiError`].
///
/// Malformed request bodies produce the same 400 `{ "error": ... }` shape
/// as service-level validation failures instead of axum's default
/// plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
