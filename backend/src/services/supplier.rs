//! Supplier management service

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{validate_required_name, EntityStatus};

use crate::error::{AppError, AppResult};

/// Supplier service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// Supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: i32,
    pub name: String,
    pub nit: String,
    pub phone: String,
    pub location: String,
    pub rating: f64,
    pub email: String,
    pub status: String,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    #[serde(default)]
    pub nit: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub email: String,
}

/// Input for updating a supplier
#[derive(Debug, Deserialize)]
pub struct UpdateSupplierInput {
    pub name: Option<String>,
    pub nit: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
}

/// Outcome of toggling a supplier's status
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub id: i32,
    pub status: String,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List suppliers, searchable by name or NIT, filterable by status
    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, nit, phone, location, rating, email, status
            FROM suppliers
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%' OR nit ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR status = $2)
            ORDER BY id
            "#,
        )
        .bind(search)
        .bind(status)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }

    /// Get a supplier by id
    pub async fn get(&self, id: i32) -> AppResult<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, nit, phone, location, rating, email, status FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Proveedor".to_string()))?;

        Ok(supplier)
    }

    /// Create a supplier. NITs are unique when provided.
    pub async fn create(&self, input: CreateSupplierInput) -> AppResult<Supplier> {
        validate_required_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
            message_es: msg.to_string(),
        })?;

        if !input.nit.is_empty() {
            let (duplicates,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM suppliers WHERE nit = $1")
                    .bind(&input.nit)
                    .fetch_one(&self.db)
                    .await?;
            if duplicates > 0 {
                return Err(AppError::duplicate(
                    "A supplier with that NIT already exists",
                    "Ya existe un proveedor con ese NIT",
                ));
            }
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, nit, phone, location, rating, email, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, nit, phone, location, rating, email, status
            "#,
        )
        .bind(&input.name)
        .bind(&input.nit)
        .bind(&input.phone)
        .bind(&input.location)
        .bind(input.rating)
        .bind(&input.email)
        .bind(EntityStatus::Activo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Update a supplier; a changed NIT must remain unique
    pub async fn update(&self, id: i32, input: UpdateSupplierInput) -> AppResult<Supplier> {
        let current = self.get(id).await?;

        let nit = input.nit.unwrap_or(current.nit);
        if !nit.is_empty() {
            let (duplicates,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM suppliers WHERE nit = $1 AND id <> $2")
                    .bind(&nit)
                    .bind(id)
                    .fetch_one(&self.db)
                    .await?;
            if duplicates > 0 {
                return Err(AppError::duplicate(
                    "Another supplier already has that NIT",
                    "Otro proveedor ya tiene ese NIT",
                ));
            }
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $1, nit = $2, phone = $3, location = $4, email = $5
            WHERE id = $6
            RETURNING id, name, nit, phone, location, rating, email, status
            "#,
        )
        .bind(input.name.unwrap_or(current.name))
        .bind(&nit)
        .bind(input.phone.unwrap_or(current.phone))
        .bind(input.location.unwrap_or(current.location))
        .bind(input.email.unwrap_or(current.email))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// Toggle a supplier between Activo and Inactivo
    pub async fn toggle(&self, id: i32) -> AppResult<ToggleOutcome> {
        let (status,): (String,) = sqlx::query_as("SELECT status FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Proveedor".to_string()))?;

        let new_status = EntityStatus::parse(&status)
            .map(EntityStatus::toggled)
            .unwrap_or(EntityStatus::Activo);

        sqlx::query("UPDATE suppliers SET status = $1 WHERE id = $2")
            .bind(new_status.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(ToggleOutcome {
            id,
            status: new_status.as_str().to_string(),
        })
    }

    /// Delete a supplier
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Proveedor".to_string()));
        }

        Ok(())
    }
}
