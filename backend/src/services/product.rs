//! Product catalog service

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{
    validate_price, validate_quantity, validate_required_name, MovementDirection, StockStatus,
};

use crate::error::{AppError, AppResult};
use crate::services::inventory::{insert_movement, set_product_stock, ProductStock};

/// Default quantity for the one-click restock action.
const DEFAULT_RESTOCK_QUANTITY: i32 = 20;

/// Product service for catalog management and restocking
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Product record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: i32,
    pub status: String,
    pub active: bool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i32,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
}

/// Input for restocking a product
#[derive(Debug, Default, Deserialize)]
pub struct RestockInput {
    pub quantity: Option<i32>,
}

/// Outcome of toggling a product's active flag
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub id: i32,
    pub active: bool,
    pub message: String,
}

/// Outcome of a restock: confirmation message plus the updated product
#[derive(Debug, Serialize)]
pub struct RestockOutcome {
    pub message: String,
    pub product: ProductStock,
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products, optionally filtered by stock band or active flag.
    pub async fn list(&self, filter: Option<&str>) -> AppResult<Vec<Product>> {
        let condition = match filter {
            Some("in-stock") => "WHERE active = true AND stock > 10",
            Some("low") => "WHERE active = true AND stock > 0 AND stock <= 10",
            Some("inactive") => "WHERE active = false",
            Some("active") => "WHERE active = true",
            _ => "",
        };

        let sql = format!(
            "SELECT id, name, sku, price, stock, status, active FROM products {} ORDER BY id",
            condition
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.db)
            .await?;

        Ok(products)
    }

    /// Get a product by id
    pub async fn get(&self, id: i32) -> AppResult<Product> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, sku, price, stock, status, active FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Producto".to_string()))?;

        Ok(product)
    }

    /// Create a product. Names are unique case-insensitively; the status
    /// label is derived from the initial stock.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_required_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
            message_es: msg.to_string(),
        })?;
        validate_price(input.price).map_err(|msg| AppError::Validation {
            field: "price".to_string(),
            message: "Price cannot be negative".to_string(),
            message_es: msg.to_string(),
        })?;

        let (duplicates,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE UPPER(name) = UPPER($1)")
                .bind(&input.name)
                .fetch_one(&self.db)
                .await?;
        if duplicates > 0 {
            return Err(AppError::duplicate(
                "A product with that name already exists",
                "Ya existe un producto con ese nombre",
            ));
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, sku, price, stock, status, active)
            VALUES ($1, $2, $3, $4, $5, true)
            RETURNING id, name, sku, price, stock, status, active
            "#,
        )
        .bind(&input.name)
        .bind(&input.sku)
        .bind(input.price)
        .bind(input.stock)
        .bind(StockStatus::from_stock(input.stock).as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Update a product. Fields left out keep their current value; the
    /// status label is recomputed from the resulting stock.
    pub async fn update(&self, id: i32, input: UpdateProductInput) -> AppResult<Product> {
        if let Some(price) = input.price {
            validate_price(price).map_err(|msg| AppError::Validation {
                field: "price".to_string(),
                message: "Price cannot be negative".to_string(),
                message_es: msg.to_string(),
            })?;
        }

        let current = self.get(id).await?;

        let name = input.name.unwrap_or(current.name);

        let (duplicates,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM products WHERE UPPER(name) = UPPER($1) AND id <> $2",
        )
        .bind(&name)
        .bind(id)
        .fetch_one(&self.db)
        .await?;
        if duplicates > 0 {
            return Err(AppError::duplicate(
                "Another product already has that name",
                "Ya existe otro producto con ese nombre",
            ));
        }

        let sku = input.sku.unwrap_or(current.sku);
        let price = input.price.unwrap_or(current.price);
        let stock = input.stock.unwrap_or(current.stock);
        let status = StockStatus::from_stock(stock);

        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $1, sku = $2, price = $3, stock = $4, status = $5
            WHERE id = $6
            RETURNING id, name, sku, price, stock, status, active
            "#,
        )
        .bind(&name)
        .bind(&sku)
        .bind(price)
        .bind(stock)
        .bind(status.as_str())
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// Toggle a product's active flag
    pub async fn toggle(&self, id: i32) -> AppResult<ToggleOutcome> {
        let (active,): (bool,) = sqlx::query_as("SELECT active FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Producto".to_string()))?;

        let new_active = !active;
        sqlx::query("UPDATE products SET active = $1 WHERE id = $2")
            .bind(new_active)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(ToggleOutcome {
            id,
            active: new_active,
            message: if new_active {
                "Producto activado".to_string()
            } else {
                "Producto inhabilitado".to_string()
            },
        })
    }

    /// Delete a product
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Producto".to_string()));
        }

        Ok(())
    }

    /// Restock a product: credit stock (20 units by default) and append the
    /// matching ENTRADA movement, as one transaction.
    pub async fn restock(&self, id: i32, input: RestockInput) -> AppResult<RestockOutcome> {
        let quantity = input.quantity.unwrap_or(DEFAULT_RESTOCK_QUANTITY);
        validate_quantity(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: "Quantity must be greater than 0".to_string(),
            message_es: msg.to_string(),
        })?;

        let mut tx = self.db.begin().await?;

        let (name, stock): (String, i32) =
            sqlx::query_as("SELECT name, stock FROM products WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound("Producto".to_string()))?;

        let new_stock = MovementDirection::Entrada.apply(stock, quantity);
        set_product_stock(&mut tx, id, new_stock).await?;

        insert_movement(
            &mut tx,
            &name,
            MovementDirection::Entrada,
            quantity,
            "Reposición desde dashboard",
        )
        .await?;

        tx.commit().await?;

        Ok(RestockOutcome {
            message: format!("Se repusieron {} unidades de {}", quantity, name),
            product: ProductStock {
                id,
                name,
                stock: new_stock,
                status: StockStatus::from_stock(new_stock).as_str().to_string(),
            },
        })
    }
}
