//! Payout settings route handlers.

use axum::extract::State;

use crate::error::{Json, Result};
use crate::models::Payout;
use crate::services::PayoutService;
use crate::services::payout::PayoutUpdate;
use crate::state::AppState;

/// Current payout record, or `null` when not configured.
pub async fn show(State(state): State<AppState>) -> Result<Json<Option<Payout>>> {
    let payout = PayoutService::new(state.store()).get().await?;
    Ok(Json(payout))
}

/// Replace the payout record.
pub async fn set(
    State(state): State<AppState>,
    Json(update): Json<PayoutUpdate>,
) -> Result<Json<Payout>> {
    let payout = PayoutService::new(state.store()).set(update).await?;
    Ok(Json(payout))
}
