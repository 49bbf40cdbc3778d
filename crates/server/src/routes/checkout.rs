//! Checkout route handlers.
//!
//! The PayPal flow is two-phase: the client creates an order, sends the
//! buyer through approval, then asks this API to capture. On a
//! successful capture the handler appends the sale to the ledger itself,
//! keyed by the provider order id, so capture retries cannot
//! double-record and payment capture and sale recording agree.

use axum::extract::State;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use outfitter_core::{Money, ProductId};

use crate::error::{ApiError, Json, Result};
use crate::paypal::{capture_succeeded, captured_total};
use crate::services::SalesService;
use crate::state::AppState;

/// Create-order request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// Capture-order request body. The optional product snapshot fields are
/// used for the ledger entry recorded on capture success.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptureOrderRequest {
    pub order_id: Option<String>,
    pub product_id: Option<ProductId>,
    pub product_name: Option<String>,
}

/// Card charge request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeRequest {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub card_token: Option<String>,
}

/// Card charge stub response.
#[derive(Debug, Serialize)]
pub struct ChargeReceipt {
    pub id: String,
    pub status: &'static str,
}

/// Create a provider order for the given amount.
pub async fn create_order(
    State(state): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::Validation("amount required".to_owned()))?;
    let amount = Money::new(amount).map_err(|e| ApiError::Validation(e.to_string()))?;
    if !amount.is_positive() {
        return Err(ApiError::Validation("amount must be positive".to_owned()));
    }
    let currency = req.currency.as_deref().unwrap_or("USD");

    let order = state
        .paypal()
        .create_order(amount, currency, req.description.as_deref())
        .await?;
    Ok(Json(order))
}

/// Capture a provider order and record the sale.
pub async fn capture_order(
    State(state): State<AppState>,
    Json(req): Json<CaptureOrderRequest>,
) -> Result<Json<serde_json::Value>> {
    let order_id = req
        .order_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("orderId required".to_owned()))?;

    let capture = state.paypal().capture_order(&order_id).await?;

    if capture_succeeded(&capture) {
        let total = captured_total(&capture).unwrap_or_else(|| {
            tracing::warn!(%order_id, "capture response carried no amount; recording zero total");
            Money::ZERO
        });
        let sale = SalesService::new(state.store())
            .record_capture(&order_id, req.product_id, req.product_name, total)
            .await?;
        tracing::info!(sale_id = %sale.id, %order_id, "sale recorded for captured order");
    } else {
        tracing::warn!(%order_id, "capture response did not indicate success; no sale recorded");
    }

    Ok(Json(capture))
}

/// Card charge stub.
///
/// Demo scaffolding only: validates the shape of the request and reports
/// approval unconditionally. No payment rail is attached, and none must
/// be until this handler is replaced with a real acquirer integration.
pub async fn charge_card(Json(req): Json<ChargeRequest>) -> Result<Json<ChargeReceipt>> {
    let amount = req
        .amount
        .ok_or_else(|| ApiError::Validation("amount and cardToken required".to_owned()))?;
    Money::new(amount).map_err(|e| ApiError::Validation(e.to_string()))?;
    if req.card_token.as_deref().is_none_or(str::is_empty) {
        return Err(ApiError::Validation(
            "amount and cardToken required".to_owned(),
        ));
    }

    tracing::warn!("card charge stub invoked; approving without a payment rail");

    Ok(Json(ChargeReceipt {
        id: uuid::Uuid::new_v4().to_string(),
        status: "APPROVED",
    }))
}
