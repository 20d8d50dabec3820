//! Purchasing service
//!
//! Purchases are created in Pendiente and confirmed to Recibido later, but
//! stock is credited when the purchase is CREATED: the moment items are
//! recorded, the matching ENTRADA movements are appended and any catalogued
//! product's stock goes up. The Recibido flip is bookkeeping only.
//!
//! A purchase line naming a product the catalog does not know is allowed:
//! the item row and its movement are still recorded, only the stock update
//! is skipped. Purchases may legitimately introduce goods not yet
//! catalogued.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{
    compute_totals, validate_line_items, LineItem, MovementDirection, OrderKind, PurchaseStatus,
};

use crate::error::{AppError, AppResult};
use crate::services::inventory::{insert_movement, set_product_stock};

/// Purchasing service
#[derive(Clone)]
pub struct PurchaseService {
    db: PgPool,
}

/// Purchase header row
#[derive(Debug, FromRow)]
struct PurchaseRow {
    id: i32,
    supplier_id: i32,
    supplier_name: String,
    total: Decimal,
    status: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    product_name: String,
    price: Decimal,
    quantity: i32,
}

/// Full purchase record with its line items
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: i32,
    pub supplier_id: i32,
    pub supplier_name: String,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a purchase
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseInput {
    pub supplier_id: Option<i32>,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// Input for the status update endpoint
#[derive(Debug, Deserialize)]
pub struct UpdateStatusInput {
    pub status: String,
}

/// Outcome of a status update
#[derive(Debug, Serialize)]
pub struct StatusOutcome {
    pub id: i32,
    pub status: String,
}

impl PurchaseService {
    /// Create a new PurchaseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List purchases, newest first
    pub async fn list(&self) -> AppResult<Vec<PurchaseRecord>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, supplier_id, supplier_name, total, status, created_at
            FROM purchases
            ORDER BY id DESC
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

    /// Create a purchase, crediting stock for catalogued products and
    /// appending one ENTRADA movement per line, atomically.
    pub async fn create(&self, input: CreatePurchaseInput) -> AppResult<PurchaseRecord> {
        let supplier_id = input.supplier_id.ok_or_else(|| AppError::Validation {
            field: "supplierId".to_string(),
            message: "A supplier must be selected".to_string(),
            message_es: "Debe seleccionar un proveedor".to_string(),
        })?;
        validate_line_items(&input.items)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let (supplier_exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1)")
                .bind(supplier_id)
                .fetch_one(&self.db)
                .await?;
        if !supplier_exists {
            return Err(AppError::NotFound("Proveedor".to_string()));
        }

        // Purchases carry no tax or transport line.
        let totals = compute_totals(&input.items, Decimal::ZERO, OrderKind::Purchase);

        let mut tx = self.db.begin().await?;

        let (purchase_id, created_at): (i32, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO purchases (supplier_id, supplier_name, total, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(supplier_id)
        .bind(&input.supplier_name)
        .bind(totals.total)
        .bind(PurchaseStatus::Pendiente.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for item in &input.items {
            sqlx::query(
                r#"
                INSERT INTO purchase_items (purchase_id, product_name, price, quantity)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(purchase_id)
            .bind(&item.product_name)
            .bind(item.price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;

            // Soft path: unknown products skip the stock credit but still
            // get their ledger entry.
            let product = sqlx::query_as::<_, (i32, i32)>(
                "SELECT id, stock FROM products WHERE name = $1 FOR UPDATE",
            )
            .bind(&item.product_name)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some((product_id, stock)) = product {
                let new_stock = MovementDirection::Entrada.apply(stock, item.quantity);
                set_product_stock(&mut tx, product_id, new_stock).await?;
            }

            insert_movement(
                &mut tx,
                &item.product_name,
                MovementDirection::Entrada,
                item.quantity,
                &format!("Compra #{}", purchase_id),
            )
            .await?;
        }

        tx.commit().await?;

        Ok(PurchaseRecord {
            id: purchase_id,
            supplier_id,
            supplier_name: input.supplier_name,
            items: input.items,
            total: totals.total,
            status: PurchaseStatus::Pendiente.as_str().to_string(),
            created_at,
        })
    }

    /// Update a purchase's status. Only the Pendiente -> Recibido transition
    /// is accepted; the flip does not touch stock.
    pub async fn update_status(&self, id: i32, input: UpdateStatusInput) -> AppResult<StatusOutcome> {
        let next = PurchaseStatus::parse(&input.status).ok_or_else(|| AppError::Validation {
            field: "status".to_string(),
            message: "Unknown purchase status".to_string(),
            message_es: "Estado inválido".to_string(),
        })?;

        let (status,): (String,) = sqlx::query_as("SELECT status FROM purchases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Compra".to_string()))?;

        let current = PurchaseStatus::parse(&status).ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("stored purchase status '{}' is invalid", status))
        })?;

        if !current.can_become(next) {
            return Err(AppError::InvalidStateTransition(format!(
                "purchase cannot move from {} to {}",
                current.as_str(),
                next.as_str()
            )));
        }

        sqlx::query("UPDATE purchases SET status = $1 WHERE id = $2")
            .bind(next.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(StatusOutcome {
            id,
            status: next.as_str().to_string(),
        })
    }

    async fn items_for(&self, purchase_id: i32) -> AppResult<Vec<LineItem>> {
        let items = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT product_name, price, quantity
            FROM purchase_items
            WHERE purchase_id = $1
            ORDER BY id
            "#,
        )
        .bind(purchase_id)
        .fetch_all(&self.db)
        .await?;

        Ok(items
            .into_iter()
            .map(|row| LineItem {
                product_name: row.product_name,
                price: row.price,
                quantity: row.quantity,
            })
            .collect())
    }
}

fn to_record(row: PurchaseRow, items: Vec<LineItem>) -> PurchaseRecord {
    PurchaseRecord {
        id: row.id,
        supplier_id: row.supplier_id,
        supplier_name: row.supplier_name,
        items,
        total: row.total,
        status: row.status,
        created_at: row.created_at,
    }
}
