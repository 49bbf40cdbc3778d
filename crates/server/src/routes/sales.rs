//! Sales ledger route handlers.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::{Json, Result};
use crate::models::Sale;
use crate::services::SalesService;
use crate::services::sales::NewSale;
use crate::state::AppState;

/// List all sales.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Sale>>> {
    let sales = SalesService::new(state.store()).list().await?;
    Ok(Json(sales))
}

/// Record a sale manually (admin tooling; the checkout flow records its
/// own sales on capture).
pub async fn record(
    State(state): State<AppState>,
    Json(input): Json<NewSale>,
) -> Result<(StatusCode, Json<Sale>)> {
    let sale = SalesService::new(state.store()).record(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
