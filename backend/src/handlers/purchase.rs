//! HTTP handlers for purchasing endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::purchase::{
    CreatePurchaseInput, PurchaseRecord, PurchaseService, StatusOutcome, UpdateStatusInput,
};
use crate::AppState;

/// List purchases
pub async fn list_purchases(State(state): State<AppState>) -> AppResult<Json<Vec<PurchaseRecord>>> {
    let service = PurchaseService::new(state.db);
    let purchases = service.list().await?;
    Ok(Json(purchases))
}

/// Create a purchase
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseInput>,
) -> AppResult<(StatusCode, Json<PurchaseRecord>)> {
    let service = PurchaseService::new(state.db);
    let purchase = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Update a purchase's status (Pendiente -> Recibido)
pub async fn update_purchase_status(
    State(state): State<AppState>,
    Path(purchase_id): Path<i32>,
    Json(input): Json<UpdateStatusInput>,
) -> AppResult<Json<StatusOutcome>> {
    let service = PurchaseService::new(state.db);
    let outcome = service.update_status(purchase_id, input).await?;
    Ok(Json(outcome))
}
