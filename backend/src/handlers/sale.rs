//! HTTP handlers for sales endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use chrono::NaiveDate;
use shared::DateRange;

use crate::error::AppResult;
use crate::services::sale::{CreateSaleInput, SaleRecord, SaleService};
use crate::AppState;

/// Date-range query parameters (`to` inclusive of the whole day)
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl From<DateRangeQuery> for DateRange {
    fn from(query: DateRangeQuery) -> Self {
        DateRange {
            from: query.from,
            to: query.to,
        }
    }
}

/// List sales, optionally bounded by a date range
pub async fn list_sales(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> AppResult<Json<Vec<SaleRecord>>> {
    let service = SaleService::new(state.db);
    let sales = service.list(range.into()).await?;
    Ok(Json(sales))
}

/// Create a sale
pub async fn create_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateSaleInput>,
) -> AppResult<(StatusCode, Json<SaleRecord>)> {
    let service = SaleService::new(state.db);
    let sale = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
