//! Store configuration route handlers.

use axum::extract::State;

use crate::error::{Json, Result};
use crate::models::StoreConfig;
use crate::services::ConfigService;
use crate::state::AppState;

/// Current store configuration.
pub async fn show(State(state): State<AppState>) -> Result<Json<StoreConfig>> {
    let config = ConfigService::new(state.store()).get().await?;
    Ok(Json(config))
}

/// Merge a partial configuration update; omitted fields are preserved.
pub async fn set(
    State(state): State<AppState>,
    Json(patch): Json<StoreConfig>,
) -> Result<Json<StoreConfig>> {
    let config = ConfigService::new(state.store()).set(patch).await?;
    Ok(Json(config))
}
