//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::auth::{
    AuthService, ForgotPasswordInput, ForgotPasswordResponse, LoginInput, LoginResponse,
};
use crate::AppState;

/// Log a user in
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let service = AuthService::new(state.db);
    let response = service.login(input).await?;
    Ok(Json(response))
}

/// Reset a forgotten password to a temporary code
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordInput>,
) -> AppResult<Json<ForgotPasswordResponse>> {
    let service = AuthService::new(state.db);
    let response = service.forgot_password(input).await?;
    Ok(Json(response))
}
