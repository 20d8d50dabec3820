//! Sales service
//!
//! Sales are created already complete. Every line is validated against the
//! catalog (product exists, is active, has sufficient stock) before any row
//! is written; a single failing line aborts the whole creation with zero
//! side effects. The inserts, stock debits and SALIDA movements then run in
//! one transaction with the product rows locked, so the check-then-act
//! sequence is atomic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{
    compute_totals, validate_line_items, DateRange, LineItem, MovementDirection, OrderKind,
    SaleStatus,
};

use crate::error::{AppError, AppResult};
use crate::services::inventory::{insert_movement, set_product_stock};

/// Sales service
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Sale header row
#[derive(Debug, FromRow)]
struct SaleRow {
    id: i32,
    client_id: String,
    client_name: String,
    employee_name: String,
    subtotal: Decimal,
    tax: Decimal,
    transport: Decimal,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

/// Line item row
#[derive(Debug, FromRow)]
struct ItemRow {
    product_name: String,
    price: Decimal,
    quantity: i32,
}

impl From<ItemRow> for LineItem {
    fn from(row: ItemRow) -> Self {
        LineItem {
            product_name: row.product_name,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

/// Full sale record with its line items
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i32,
    pub client_id: String,
    pub client_name: String,
    pub employee_name: String,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub transport: Decimal,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a sale
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleInput {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub transport: Decimal,
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List sales, newest first, optionally bounded by a date range
    /// (`to` is inclusive of the whole day).
    pub async fn list(&self, range: DateRange) -> AppResult<Vec<SaleRecord>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, client_id, client_name, employee_name,
                   subtotal, tax, transport, total, status, created_at
            FROM sales
            WHERE ($1::date IS NULL OR created_at >= $1)
              AND ($2::date IS NULL OR created_at < $2)
            ORDER BY id DESC
            "#,
        )
        .bind(range.from)
        .bind(range.to_exclusive())
        .fetch_all(&self.db)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.items_for(row.id).await?;
            result.push(to_record(row, items));
        }

        Ok(result)
    }

    /// Create a sale, debiting stock and logging one SALIDA movement per
    /// line, atomically.
    pub async fn create(&self, input: CreateSaleInput) -> AppResult<SaleRecord> {
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

        // Validate every line with the product rows locked; nothing is
        // written until all lines pass.
        let mut debits: Vec<(i32, i32)> = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let (product_id, stock, active) = sqlx::query_as::<_, (i32, i32, bool)>(
                "SELECT id, stock, active FROM products WHERE name = $1 FOR UPDATE",
            )
            .bind(&item.product_name)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Producto '{}'", item.product_name)))?;

            if !active {
                return Err(AppError::InactiveEntity {
                    entity: "producto".to_string(),
                    name: item.product_name.clone(),
                });
            }
            if stock < item.quantity {
                return Err(AppError::InsufficientStock {
                    product: item.product_name.clone(),
                    available: stock,
                    requested: item.quantity,
                });
            }

            // Pre-validated: the debit subtracts exactly, no clamping.
            debits.push((product_id, stock - item.quantity));
        }

        let totals = compute_totals(&input.items, input.transport, OrderKind::Sale);

        let (sale_id, created_at): (i32, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO sales (client_id, client_name, employee_name,
                               subtotal, tax, transport, total, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at
            "#,
        )
        .bind(&input.client_id)
        .bind(&input.client_name)
        .bind(&input.employee_name)
        .bind(totals.subtotal)
        .bind(totals.tax)
        .bind(input.transport)
        .bind(totals.total)
        .bind(SaleStatus::Completada.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for (item, (product_id, new_stock)) in input.items.iter().zip(debits) {
            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_name, price, quantity)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(sale_id)
            .bind(&item.product_name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            set_product_stock(&mut tx, product_id, new_stock).await?;

            insert_movement(
                &mut tx,
                &item.product_name,
                MovementDirection::Salida,
                item.quantity,
                &format!("Venta #{}", sale_id),
            )
            .await?;
        }

        tx.commit().await?;

        Ok(SaleRecord {
            id: sale_id,
            client_id: input.client_id,
            client_name: input.client_name,
            employee_name: input.employee_name,
            items: input.items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            transport: input.transport,
            total: totals.total,
            status: SaleStatus::Completada.as_str().to_string(),
            created_at,
        })
    }

    async fn items_for(&self, sale_id: i32) -> AppResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, ItemRow>(
            "SELECT product_name, price, quantity FROM sale_items WHERE sale_id = $1 ORDER BY id",
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items.into_iter().map(LineItem::from).collect())
    }
}

fn to_record(row: SaleRow, items: Vec<LineItem>) -> SaleRecord {
    SaleRecord {
        id: row.id,
        client_id: row.client_id,
        client_name: row.client_name,
        employee_name: row.employee_name,
        items,
        subtotal: row.subtotal,
        tax: row.tax,
        transport: row.transport,
        total: row.total,
        status: row.status,
        created_at: row.created_at,
    }
}
