//! Client management service
//!
//! Clients are keyed by generated text ids of the form `CL-<n>`, a contract
//! inherited from the original system.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{validate_phone, validate_required_name, EntityStatus};

use crate::error::{AppError, AppResult};

/// Client service
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

/// Client record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: String,
}

/// Input for creating a client
#[derive(Debug, Deserialize)]
pub struct CreateClientInput {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Input for updating a client
#[derive(Debug, Deserialize)]
pub struct UpdateClientInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Outcome of toggling a client's status
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub id: String,
    pub status: String,
}

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List clients, optionally filtered by status
    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
            SELECT id, name, email, phone, address, status
            FROM clients
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(&self.db)
        .await?;

        Ok(clients)
    }

    /// Get a client by id
    pub async fn get(&self, id: &str) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, address, status FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?;

        Ok(client)
    }

    /// Create a client with a generated `CL-<n>` id
    pub async fn create(&self, input: CreateClientInput) -> AppResult<Client> {
        validate_required_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
            message_es: msg.to_string(),
        })?;
        if !input.phone.is_empty() {
            validate_phone(&input.phone).map_err(|msg| AppError::Validation {
                field: "phone".to_string(),
                message: "Phone must have 10 digits".to_string(),
                message_es: msg.to_string(),
            })?;
        }

        if !input.email.is_empty() {
            let (duplicates,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM clients WHERE email = $1")
                    .bind(&input.email)
                    .fetch_one(&self.db)
                    .await?;
            if duplicates > 0 {
                return Err(AppError::duplicate(
                    "A client with that email already exists",
                    "Ya existe un cliente con ese email",
                ));
            }
        }

        // Generate the next CL-<n> id from the highest existing one.
        let (max_num,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(CAST(REPLACE(id, 'CL-', '') AS INTEGER)), 0) FROM clients",
        )
        .fetch_one(&self.db)
        .await?;
        let client_id = format!("CL-{}", max_num + 1);

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, email, phone, address, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, address, status
            "#,
        )
        .bind(&client_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .bind(EntityStatus::Activo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(client)
    }

    /// Update a client; omitted fields keep their current values
    pub async fn update(&self, id: &str, input: UpdateClientInput) -> AppResult<Client> {
        if let Some(phone) = input.phone.as_deref() {
            if !phone.is_empty() {
                validate_phone(phone).map_err(|msg| AppError::Validation {
                    field: "phone".to_string(),
                    message: "Phone must have 10 digits".to_string(),
                    message_es: msg.to_string(),
                })?;
            }
        }

        let current = self.get(id).await?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $1, email = $2, phone = $3, address = $4
            WHERE id = $5
            RETURNING id, name, email, phone, address, status
            "#,
        )
        .bind(input.name.unwrap_or(current.name))
        .bind(input.email.unwrap_or(current.email))
        .bind(input.phone.unwrap_or(current.phone))
        .bind(input.address.unwrap_or(current.address))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(client)
    }

    /// Toggle a client between Activo and Inactivo
    pub async fn toggle(&self, id: &str) -> AppResult<ToggleOutcome> {
        let (status,): (String,) = sqlx::query_as("SELECT status FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente".to_string()))?;

        let new_status = EntityStatus::parse(&status)
            .map(EntityStatus::toggled)
            .unwrap_or(EntityStatus::Activo);

        sqlx::query("UPDATE clients SET status = $1 WHERE id = $2")
            .bind(new_status.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(ToggleOutcome {
            id: id.to_string(),
            status: new_status.as_str().to_string(),
        })
    }

    /// Delete a client
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cliente".to_string()));
        }

        Ok(())
    }
}
