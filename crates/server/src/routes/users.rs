//! User and role route handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::error::{Json, Result};
use crate::models::PublicUser;
use crate::services::IdentityService;
use crate::services::identity::{LoginRequest, RegisterRequest, SetRoleRequest};
use crate::state::AppState;

/// Purge response: how many users remain.
#[derive(Debug, Serialize)]
pub struct Remaining {
    pub remaining: usize,
}

/// List all users, credential hashes omitted.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>> {
    let users = IdentityService::new(state.store(), &state.config().admin_email)
        .list()
        .await?;
    Ok(Json(users))
}

/// Upsert a user's role by email.
pub async fn set_role(
    State(state): State<AppState>,
    Json(req): Json<SetRoleRequest>,
) -> Result<Json<PublicUser>> {
    let user = IdentityService::new(state.store(), &state.config().admin_email)
        .set_role(req)
        .await?;
    Ok(Json(user))
}

/// Remove every user except the configured admin. Irreversible; the
/// calling UI is responsible for confirmation.
pub async fn purge(State(state): State<AppState>) -> Result<Json<Remaining>> {
    let remaining = IdentityService::new(state.store(), &state.config().admin_email)
        .purge()
        .await?;
    Ok(Json(Remaining { remaining }))
}

/// Register a new account.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>)> {
    let user = IdentityService::new(state.store(), &state.config().admin_email)
        .register(req)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate an account.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<PublicUser>> {
    let user = IdentityService::new(state.store(), &state.config().admin_email)
        .login(req)
        .await?;
    Ok(Json(user))
}
