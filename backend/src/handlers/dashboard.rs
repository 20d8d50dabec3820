//! HTTP handlers for the dashboard endpoint

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::dashboard::{DashboardService, DashboardView};
use crate::AppState;

/// Get dashboard statistics and low-stock alerts
pub async fn get_dashboard_stats(State(state): State<AppState>) -> AppResult<Json<DashboardView>> {
    let service = DashboardService::new(state.db);
    let view = service.stats().await?;
    Ok(Json(view))
}
