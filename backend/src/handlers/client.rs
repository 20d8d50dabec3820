//! HTTP handlers for client endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::client::{
    Client, ClientService, CreateClientInput, ToggleOutcome, UpdateClientInput,
};
use crate::AppState;

/// Query parameters for the client listing
#[derive(Debug, Deserialize)]
pub struct ClientFilter {
    pub status: Option<String>,
}

/// List clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<ClientFilter>,
) -> AppResult<Json<Vec<Client>>> {
    let service = ClientService::new(state.db);
    let clients = service.list(params.status.as_deref()).await?;
    Ok(Json(clients))
}

/// Get a client by id
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.get(&client_id).await?;
    Ok(Json(client))
}

/// Create a client
pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClientInput>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let service = ClientService::new(state.db);
    let client = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(input): Json<UpdateClientInput>,
) -> AppResult<Json<Client>> {
    let service = ClientService::new(state.db);
    let client = service.update(&client_id, input).await?;
    Ok(Json(client))
}

/// Toggle a client's status
pub async fn toggle_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> AppResult<Json<ToggleOutcome>> {
    let service = ClientService::new(state.db);
    let outcome = service.toggle(&client_id).await?;
    Ok(Json(outcome))
}

/// Delete a client
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> AppResult<Json<DeletedResponse>> {
    let service = ClientService::new(state.db);
    service.delete(&client_id).await?;
    Ok(Json(DeletedResponse {
        message: "Cliente eliminado".to_string(),
    }))
}
