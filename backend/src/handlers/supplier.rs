//! HTTP handlers for supplier endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::supplier::{
    CreateSupplierInput, Supplier, SupplierService, ToggleOutcome, UpdateSupplierInput,
};
use crate::AppState;

/// Query parameters for the supplier listing
#[derive(Debug, Deserialize)]
pub struct SupplierFilter {
    pub search: Option<String>,
    pub status: Option<String>,
}

/// List suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<SupplierFilter>,
) -> AppResult<Json<Vec<Supplier>>> {
    let service = SupplierService::new(state.db);
    let suppliers = service
        .list(params.search.as_deref(), params.status.as_deref())
        .await?;
    Ok(Json(suppliers))
}

/// Get a supplier by id
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i32>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.get(supplier_id).await?;
    Ok(Json(supplier))
}

/// Create a supplier
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplierInput>,
) -> AppResult<(StatusCode, Json<Supplier>)> {
    let service = SupplierService::new(state.db);
    let supplier = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// Update a supplier
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i32>,
    Json(input): Json<UpdateSupplierInput>,
) -> AppResult<Json<Supplier>> {
    let service = SupplierService::new(state.db);
    let supplier = service.update(supplier_id, input).await?;
    Ok(Json(supplier))
}

/// Toggle a supplier's status
pub async fn toggle_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i32>,
) -> AppResult<Json<ToggleOutcome>> {
    let service = SupplierService::new(state.db);
    let outcome = service.toggle(supplier_id).await?;
    Ok(Json(outcome))
}

/// Delete a supplier
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    let service = SupplierService::new(state.db);
    service.delete(supplier_id).await?;
    Ok(Json(DeletedResponse {
        message: "Proveedor eliminado".to_string(),
    }))
}
