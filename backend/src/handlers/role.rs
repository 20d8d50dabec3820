//! HTTP handlers for role management endpoints
//!
//! Mutations are guarded by the [`AdminRole`] extractor; listing is open.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::middleware::AdminRole;
use crate::services::role::{CreateRoleInput, Role, RoleService, UpdateRoleInput};
use crate::AppState;

/// List roles
pub async fn list_roles(State(state): State<AppState>) -> AppResult<Json<Vec<Role>>> {
    let service = RoleService::new(state.db);
    let roles = service.list().await?;
    Ok(Json(roles))
}

/// Create a role (admin only)
pub async fn create_role(
    State(state): State<AppState>,
    _admin: AdminRole,
    Json(input): Json<CreateRoleInput>,
) -> AppResult<(StatusCode, Json<Role>)> {
    let service = RoleService::new(state.db);
    let role = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(role)))
}

/// Update a role (admin only)
pub async fn update_role(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(role_id): Path<i32>,
    Json(input): Json<UpdateRoleInput>,
) -> AppResult<Json<Role>> {
    let service = RoleService::new(state.db);
    let role = service.update(role_id, input).await?;
    Ok(Json(role))
}

/// Delete a role (admin only)
pub async fn delete_role(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(role_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    let service = RoleService::new(state.db);
    service.delete(role_id).await?;
    Ok(Json(DeletedResponse {
        message: "Rol eliminado".to_string(),
    }))
}
