//! Quotes service
//!
//! Quotes never touch stock. Drafts can have their items fully replaced
//! (delete-and-reinsert, totals recomputed); once sent they are immutable.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use shared::{compute_totals, round_money, validate_line_items, LineItem, OrderKind, QuoteStatus};

use crate::error::{AppError, AppResult};

/// Default validity window for new quotes, in days.
const DEFAULT_VALIDITY_DAYS: i32 = 30;

/// Quotes service
#[derive(Clone)]
pub struct QuoteService {
    db: PgPool,
}

/// Quote header row
#[derive(Debug, FromRow)]
struct QuoteRow {
    id: i32,
    client_id: String,
    client_name: String,
    subtotal: Decimal,
    tax: Decimal,
    transport: Decimal,
    total: Decimal,
    status: String,
    validity_days: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    product_name: String,
    price: Decimal,
    quantity: i32,
}

/// Full quote record with its line items
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub id: i32,
    pub client_id: String,
    pub client_name: String,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub transport: Decimal,
    pub total: Decimal,
    pub status: String,
    pub validity_days: i32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteInput {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub transport: Decimal,
    pub validity_days: Option<i32>,
}

/// Input for updating a draft quote
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuoteInput {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub transport: Option<Decimal>,
    pub items: Option<Vec<LineItem>>,
}

/// Outcome of sending a quote
#[derive(Debug, Serialize)]
pub struct SendOutcome {
    pub message: String,
}

impl QuoteService {
    /// Create a new QuoteService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all quotes with their items
    pub async fn list(&self) -> AppResult<Vec<QuoteRecord>> {
        let rows = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, client_id, client_name, subtotal, tax, transport,
                   total, status, validity_days, created_at
            FROM quotes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for(row.id).await?;
            result.push(to_record(row, items));
        }

        Ok(result)
    }

    /// Create a quote in Borrador status
    pub async fn create(&self, input: CreateQuoteInput) -> AppResult<QuoteRecord> {
        if input.client_id.trim().is_empty() {
            return Err(AppError::Validation {
                field: "clientId".to_string(),
                message: "A client must be selected".to_string(),
                message_es: "Debe seleccionar un cliente".to_string(),
            });
        }
        validate_line_items(&input.items)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let mut tx = self.db.begin().await?;
        check_products(&mut tx, &input.items).await?;

        let totals = compute_totals(&input.items, input.transport, OrderKind::Quote);
        let validity_days = input.validity_days.unwrap_or(DEFAULT_VALIDITY_DAYS);

        let (quote_id, created_at): (i32, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO quotes (client_id, client_name, subtotal, tax, transport,
                                total, status, validity_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(&input.client_id)
        .bind(&input.client_name)
        .bind(totals.subtotal)
        .bind(totals.tax)
        .bind(input.transport)
        .bind(totals.total)
        .bind(QuoteStatus::Borrador.as_str())
        .bind(validity_days)
        .fetch_one(&mut *tx)
        .await?;

        insert_items(&mut tx, quote_id, &input.items).await?;

        tx.commit().await?;

        Ok(QuoteRecord {
            id: quote_id,
            client_id: input.client_id,
            client_name: input.client_name,
            items: input.items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            transport: input.transport,
            total: totals.total,
            status: QuoteStatus::Borrador.as_str().to_string(),
            validity_days,
            created_at,
        })
    }

    /// Update a draft quote. Passing `items` replaces the whole set and
    /// recomputes the totals; the previous line items are deleted, never
    /// orphaned. Sent quotes reject any edit.
    pub async fn update(&self, id: i32, input: UpdateQuoteInput) -> AppResult<QuoteRecord> {
        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, client_id, client_name, subtotal, tax, transport,
                   total, status, validity_days, created_at
            FROM quotes
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Cotización".to_string()))?;

        let status = parse_status(&current.status)?;
        if !status.is_editable() {
            return Err(AppError::InvalidStateTransition(format!(
                "a quote in {} status cannot be edited",
                status.as_str()
            )));
        }

        let client_id = input.client_id.unwrap_or(current.client_id);
        let client_name = input.client_name.unwrap_or(current.client_name);
        let transport = input.transport.unwrap_or(current.transport);

        let (items, subtotal, tax, total) = match input.items {
            Some(items) => {
                validate_line_items(&items)
                    .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
                check_products(&mut tx, &items).await?;

                sqlx::query("DELETE FROM quote_items WHERE quote_id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                insert_items(&mut tx, id, &items).await?;

                let totals = compute_totals(&items, transport, OrderKind::Quote);
                (items, totals.subtotal, totals.tax, totals.total)
            }
            None => {
                // Items untouched; keep stored subtotal/tax but re-derive the
                // total so it never diverges from subtotal + tax + transport.
                let total = round_money(current.subtotal + current.tax + transport);
                let items = self.items_in_tx(&mut tx, id).await?;
                (items, current.subtotal, current.tax, total)
            }
        };

        sqlx::query(
            r#"
            UPDATE quotes
            SET client_id = $1, client_name = $2, subtotal = $3, tax = $4,
                transport = $5, total = $6
            WHERE id = $7
            "#,
        )
        .bind(&client_id)
        .bind(&client_name)
        .bind(subtotal)
        .bind(tax)
        .bind(transport)
        .bind(total)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(QuoteRecord {
            id,
            client_id,
            client_name,
            items,
            subtotal,
            tax,
            transport,
            total,
            status: current.status,
            validity_days: current.validity_days,
            created_at: current.created_at,
        })
    }

    /// Send a draft quote (Borrador -> Enviada). Terminal afterwards.
    pub async fn send(&self, id: i32) -> AppResult<SendOutcome> {
        let mut tx = self.db.begin().await?;

        let (status,): (String,) =
            sqlx::query_as("SELECT status FROM quotes WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Cotización".to_string()))?;

        let status = parse_status(&status)?;
        if !status.can_send() {
            return Err(AppError::InvalidStateTransition(format!(
                "a quote in {} status cannot be sent",
                status.as_str()
            )));
        }

        sqlx::query("UPDATE quotes SET status = $1 WHERE id = $2")
            .bind(QuoteStatus::Enviada.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(SendOutcome {
            message: "Cotización enviada exitosamente".to_string(),
        })
    }

    async fn items_for(&self, quote_id: i32) -> AppResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, ItemRow>(
            "SELECT product_name, price, quantity FROM quote_items WHERE quote_id = $1 ORDER BY id",
        )
        .bind(quote_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items.into_iter().map(to_line_item).collect())
    }

    async fn items_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        quote_id: i32,
    ) -> AppResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, ItemRow>(
            "SELECT product_name, price, quantity FROM quote_items WHERE quote_id = $1 ORDER BY id",
        )
        .bind(quote_id)
        .fetch_all(&mut **tx)
        .await?;

        Ok(items.into_iter().map(to_line_item).collect())
    }
}

/// Quoted products must exist and be active. Quotes reference them by name
/// only; stock is not checked because quotes reserve nothing.
async fn check_products(
    tx: &mut Transaction<'_, Postgres>,
    items: &[LineItem],
) -> AppResult<()> {
    for item in items {
        let (active,): (bool,) =
            sqlx::query_as("SELECT active FROM products WHERE name = $1")
                .bind(&item.product_name)
                .fetch_optional(&mut **tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Producto '{}'", item.product_name)))?;

        if !active {
            return Err(AppError::InactiveEntity {
                entity: "producto".to_string(),
                name: item.product_name.clone(),
            });
        }
    }
    Ok(())
}

async fn insert_items(
    tx: &mut Transaction<'_, Postgres>,
    quote_id: i32,
    items: &[LineItem],
) -> Result<(), sqlx::Error> {
    for item in items {
        sqlx::query(
            r#"
            INSERT INTO quote_items (quote_id, product_name, price, quantity)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(quote_id)
        .bind(&item.product_name)
        .bind(item.price)
        .bind(item.quantity)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn parse_status(status: &str) -> AppResult<QuoteStatus> {
    QuoteStatus::parse(status).ok_or_else(|| {
        AppError::InternalError(anyhow::anyhow!("stored quote status '{}' is invalid", status))
    })
}

fn to_line_item(row: ItemRow) -> LineItem {
    LineItem {
        product_name: row.product_name,
        price: row.price,
        quantity: row.quantity,
    }
}

fn to_record(row: QuoteRow, items: Vec<LineItem>) -> QuoteRecord {
    QuoteRecord {
        id: row.id,
        client_id: row.client_id,
        client_name: row.client_name,
        items,
        subtotal: row.subtotal,
        tax: row.tax,
        transport: row.transport,
        total: row.total,
        status: row.status,
        validity_days: row.validity_days,
        created_at: row.created_at,
    }
}
