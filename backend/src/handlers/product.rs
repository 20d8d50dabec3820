//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::product::{
    CreateProductInput, Product, ProductService, RestockInput, RestockOutcome, ToggleOutcome,
    UpdateProductInput,
};
use crate::AppState;

/// Query parameters for the product listing
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub filter: Option<String>,
}

/// List products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductFilter>,
) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list(params.filter.as_deref()).await?;
    Ok(Json(products))
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

/// Toggle a product's active flag
pub async fn toggle_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<ToggleOutcome>> {
    let service = ProductService::new(state.db);
    let outcome = service.toggle(product_id).await?;
    Ok(Json(outcome))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(Json(DeletedResponse {
        message: "Producto eliminado".to_string(),
    }))
}

/// Restock a product. The body is optional; the quantity defaults to 20.
pub async fn restock_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    input: Option<Json<RestockInput>>,
) -> AppResult<Json<RestockOutcome>> {
    let service = ProductService::new(state.db);
    let input = input.map(|Json(i)| i).unwrap_or_default();
    let outcome = service.restock(product_id, input).await?;
    Ok(Json(outcome))
}
