//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::AppResult;
use crate::handlers::sale::DateRangeQuery;
use crate::services::report::{ReportService, SalesReport};
use crate::AppState;

/// Get the sales report for a date range
pub async fn get_sales_report(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<SalesReport>> {
    let service = ReportService::new(state.db);
    let report = service.sales(range.into()).await?;
    Ok(Json(report))
}
