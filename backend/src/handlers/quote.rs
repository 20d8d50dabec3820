//! HTTP handlers for quote endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::AppResult;
use crate::services::quote::{
    CreateQuoteInput, QuoteRecord, QuoteService, SendOutcome, UpdateQuoteInput,
};
use crate::AppState;

/// List quotes
pub async fn list_quotes(State(state): State<AppState>) -> AppResult<Json<Vec<QuoteRecord>>> {
    let service = QuoteService::new(state.db);
    let quotes = service.list().await?;
    Ok(Json(quotes))
}

/// Create a quote
pub async fn create_quote(
    State(state): State<AppState>,
    Json(input): Json<CreateQuoteInput>,
) -> AppResult<(StatusCode, Json<QuoteRecord>)> {
    let service = QuoteService::new(state.db);
    let quote = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(quote)))
}

/// Update a draft quote (full line-item replacement)
pub async fn update_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<i32>,
    Json(input): Json<UpdateQuoteInput>,
) -> AppResult<Json<QuoteRecord>> {
    let service = QuoteService::new(state.db);
    let quote = service.update(quote_id, input).await?;
    Ok(Json(quote))
}

/// Send a draft quote
pub async fn send_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<i32>,
) -> AppResult<Json<SendOutcome>> {
    let service = QuoteService::new(state.db);
    let outcome = service.send(quote_id).await?;
    Ok(Json(outcome))
}
