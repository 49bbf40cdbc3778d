//! Catalog route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

use outfitter_core::ProductId;

use crate::error::{Json, Result};
use crate::models::Product;
use crate::services::CatalogService;
use crate::services::catalog::{NewProduct, ProductPatch};
use crate::state::AppState;

/// Delete response: whether a record was actually removed.
#[derive(Debug, Serialize)]
pub struct Removed {
    pub removed: bool,
}

/// List all products.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.store()).list().await?;
    Ok(Json(products))
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = CatalogService::new(state.store()).create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    let product = CatalogService::new(state.store())
        .update(&ProductId::new(id), patch)
        .await?;
    Ok(Json(product))
}

/// Delete a product. Deleting an absent id is not an error.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Removed>> {
    let removed = CatalogService::new(state.store())
        .delete(&ProductId::new(id))
        .await?;
    Ok(Json(Removed { removed }))
}
