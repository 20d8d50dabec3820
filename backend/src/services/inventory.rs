//! Stock ledger service
//!
//! Every stock-changing action mutates `products.stock` and appends exactly
//! one `inventory_movements` row, as a pair, inside a single transaction.
//! The product row is locked (`SELECT ... FOR UPDATE`) for the whole
//! read-modify-write so concurrent movements on the same product cannot lose
//! updates. Movements denormalize the product name at the time of the event;
//! they are never joined back to the products table.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use shared::{validate_quantity, MovementDirection, StockStatus};

use crate::error::{AppError, AppResult};

/// Inventory service for stock movements and inventory views
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Inventory movement record (append-only ledger entry)
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i32,
    pub product_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub direction: String,
    pub quantity: i32,
    pub reason: String,
    #[serde(rename = "date")]
    pub movement_date: NaiveDate,
}

/// Input for recording a manual inventory movement
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMovementInput {
    pub product_name: String,
    #[serde(rename = "type")]
    pub direction: MovementDirection,
    pub quantity: i32,
    #[serde(default)]
    pub reason: String,
}

/// Product stock snapshot returned alongside ledger outcomes
#[derive(Debug, Clone, Serialize)]
pub struct ProductStock {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    pub status: String,
}

/// Outcome of a recorded movement: the ledger entry plus the updated product
#[derive(Debug, Serialize)]
pub struct MovementOutcome {
    #[serde(flatten)]
    pub movement: Movement,
    pub product: ProductStock,
}

/// Aggregate inventory statistics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    #[serde(rename = "totalSKUs")]
    pub total_skus: i64,
    pub alerts: i64,
    pub total_value: Decimal,
}

/// Product row for inventory listings
#[derive(Debug, Serialize, FromRow)]
pub struct InventoryProduct {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: i32,
    pub status: String,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a manual inventory adjustment.
    ///
    /// Quantity must be strictly positive and the product must exist. A
    /// SALIDA larger than the current stock is rejected with the available
    /// quantity; after that pre-check the write path still floors at zero,
    /// so persisted stock can never go negative.
    pub async fn record_movement(&self, input: RecordMovementInput) -> AppResult<MovementOutcome> {
        validate_quantity(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: "Quantity must be greater than 0".to_string(),
            message_es: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let (product_id, stock) = sqlx::query_as::<_, (i32, i32)>(
            "SELECT id, stock FROM products WHERE name = $1 FOR UPDATE",
        )
        .bind(&input.product_name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto".to_string()))?;

        if input.direction == MovementDirection::Salida && stock < input.quantity {
            return Err(AppError::InsufficientStock {
                product: input.product_name.clone(),
                available: stock,
                requested: input.quantity,
            });
        }

        let new_stock = input.direction.apply(stock, input.quantity);
        set_product_stock(&mut tx, product_id, new_stock).await?;

        let movement = insert_movement(
            &mut tx,
            &input.product_name,
            input.direction,
            input.quantity,
            &input.reason,
        )
        .await?;

        tx.commit().await?;

        Ok(MovementOutcome {
            movement,
            product: ProductStock {
                id: product_id,
                name: input.product_name,
                stock: new_stock,
                status: StockStatus::from_stock(new_stock).as_str().to_string(),
            },
        })
    }

    /// List all movements, newest first
    pub async fn list_movements(&self) -> AppResult<Vec<Movement>> {
        let movements = sqlx::query_as::<_, Movement>(
            r#"
            SELECT id, product_name, type, quantity, reason, movement_date
            FROM inventory_movements
            ORDER BY movement_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(movements)
    }

    /// Aggregate inventory statistics over active products
    pub async fn stats(&self) -> AppResult<InventoryStats> {
        let (total_skus,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE active = true")
                .fetch_one(&self.db)
                .await?;

        let (alerts,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE active = true AND stock <= 5")
                .fetch_one(&self.db)
                .await?;

        let (total_value,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(price * stock), 0) FROM products WHERE active = true",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(InventoryStats {
            total_skus,
            alerts,
            total_value,
        })
    }

    /// List active products for the inventory view.
    ///
    /// `filter=critical` keeps products under 5 units; `filter=low` keeps
    /// the 5..=10 band. Rows come back ordered by stock, lowest first.
    pub async fn list_products(&self, filter: Option<&str>) -> AppResult<Vec<InventoryProduct>> {
        let condition = match filter {
            Some("critical") => "AND stock < 5",
            Some("low") => "AND stock >= 5 AND stock <= 10",
            _ => "",
        };

        let sql = format!(
            r#"
            SELECT id, name, sku, price, stock, status
            FROM products
            WHERE active = true {}
            ORDER BY stock
            "#,
            condition
        );

        let products = sqlx::query_as::<_, InventoryProduct>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(products)
    }
}

/// Append one ledger row. Callers must run this inside the same transaction
/// that mutates the product's stock so the pair commits or rolls back
/// together.
pub(crate) async fn insert_movement(
    tx: &mut Transaction<'_, Postgres>,
    product_name: &str,
    direction: MovementDirection,
    quantity: i32,
    reason: &str,
) -> Result<Movement, sqlx::Error> {
    sqlx::query_as::<_, Movement>(
        r#"
        INSERT INTO inventory_movements (product_name, type, quantity, reason)
        VALUES ($1, $2, $3, $4)
        RETURNING id, product_name, type, quantity, reason, movement_date
        "#,
    )
    .bind(product_name)
    .bind(direction.as_str())
    .bind(quantity)
    .bind(reason)
    .fetch_one(&mut **tx)
    .await
}

/// Persist a new stock count together with its derived status label.
pub(crate) async fn set_product_stock(
    tx: &mut Transaction<'_, Postgres>,
    product_id: i32,
    new_stock: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET stock = $1, status = $2 WHERE id = $3")
        .bind(new_stock)
        .bind(StockStatus::from_stock(new_stock).as_str())
        .bind(product_id)
        .execute(&mut **tx)
        .await?;

    Ok(())
}
