//! HTTP handlers for user management endpoints
//!
//! Mutations are guarded by the [`AdminRole`] extractor; listing is open,
//! matching the original route map.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::middleware::AdminRole;
use crate::services::user::{
    ChangePasswordInput, CreateUserInput, ToggleOutcome, UpdateUserInput, User, UserService,
};
use crate::AppState;

/// Query parameters for the user listing
#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub status: Option<String>,
}

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilter>,
) -> AppResult<Json<Vec<User>>> {
    let service = UserService::new(state.db);
    let users = service.list(params.status.as_deref()).await?;
    Ok(Json(users))
}

/// Create a user (admin only)
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminRole,
    Json(input): Json<CreateUserInput>,
) -> AppResult<(StatusCode, Json<User>)> {
    let service = UserService::new(state.db);
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user (admin only)
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(user_id): Path<i32>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<Json<User>> {
    let service = UserService::new(state.db);
    let user = service.update(user_id, input).await?;
    Ok(Json(user))
}

/// Toggle a user's status (admin only)
pub async fn toggle_user(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ToggleOutcome>> {
    let service = UserService::new(state.db);
    let outcome = service.toggle(user_id).await?;
    Ok(Json(outcome))
}

/// Change a user's password (admin only)
pub async fn change_user_password(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(user_id): Path<i32>,
    Json(input): Json<ChangePasswordInput>,
) -> AppResult<Json<MessageResponse>> {
    let service = UserService::new(state.db);
    service.change_password(user_id, input).await?;
    Ok(Json(MessageResponse {
        message: "Contraseña actualizada".to_string(),
    }))
}

/// Delete a user (admin only)
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminRole,
    Path(user_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    let service = UserService::new(state.db);
    service.delete(user_id).await?;
    Ok(Json(DeletedResponse {
        message: "Usuario eliminado".to_string(),
    }))
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
