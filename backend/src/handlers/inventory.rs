//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::inventory::{
    InventoryProduct, InventoryService, InventoryStats, Movement, MovementOutcome,
    RecordMovementInput,
};
use crate::AppState;

/// Query parameters for the inventory product listing
#[derive(Debug, Deserialize)]
pub struct InventoryFilter {
    pub filter: Option<String>,
}

/// Get aggregate inventory statistics
pub async fn get_inventory_stats(State(state): State<AppState>) -> AppResult<Json<InventoryStats>> {
    let service = InventoryService::new(state.db);
    let stats = service.stats().await?;
    Ok(Json(stats))
}

/// List active products for the inventory view
pub async fn list_inventory_products(
    State(state): State<AppState>,
    Query(params): Query<InventoryFilter>,
) -> AppResult<Json<Vec<InventoryProduct>>> {
    let service = InventoryService::new(state.db);
    let products = service.list_products(params.filter.as_deref()).await?;
    Ok(Json(products))
}

/// List all inventory movements
pub async fn list_movements(State(state): State<AppState>) -> AppResult<Json<Vec<Movement>>> {
    let service = InventoryService::new(state.db);
    let movements = service.list_movements().await?;
    Ok(Json(movements))
}

/// Record a manual inventory movement
pub async fn record_movement(
    State(state): State<AppState>,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<(StatusCode, Json<MovementOutcome>)> {
    let service = InventoryService::new(state.db);
    let outcome = service.record_movement(input).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
