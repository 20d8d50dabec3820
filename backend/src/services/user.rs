//! User account management service
//!
//! Passwords are stored and compared in plaintext; that is the behavioral
//! contract of the source system and explicitly out of scope to harden.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::EntityStatus;

use crate::error::{AppError, AppResult};

/// Default password assigned to newly created accounts.
const DEFAULT_PASSWORD: &str = "123456";

/// Default role for new accounts.
const DEFAULT_ROLE: &str = "Vendedor";

/// User service
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// User record. The password column is never selected into this type.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

/// Input for creating a user
#[derive(Debug, Deserialize)]
pub struct CreateUserInput {
    #[serde(default)]
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Input for updating a user
#[derive(Debug, Deserialize)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Input for changing a user's password
#[derive(Debug, Deserialize)]
pub struct ChangePasswordInput {
    #[serde(default)]
    pub password: String,
}

/// Outcome of toggling a user's status
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub id: i32,
    pub status: String,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List users, optionally filtered by status (`activo` / anything else
    /// maps to Inactivo, matching the original query contract)
    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<User>> {
        let status = status.map(|s| if s == "activo" { "Activo" } else { "Inactivo" });

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, status
            FROM users
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    /// Create a user. Email is required and unique; password defaults to
    /// "123456" and role to "Vendedor".
    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        if input.email.trim().is_empty() {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: "Email is required".to_string(),
                message_es: "Email requerido".to_string(),
            });
        }

        self.check_duplicate_email(&input.email, None).await?;

        let password = input.password.unwrap_or_else(|| DEFAULT_PASSWORD.to_string());
        let role = input.role.unwrap_or_else(|| DEFAULT_ROLE.to_string());

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password, role, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, role, status
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&password)
        .bind(&role)
        .bind(EntityStatus::Activo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    /// Update a user; a changed email must remain unique
    pub async fn update(&self, id: i32, input: UpdateUserInput) -> AppResult<User> {
        let current = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, status FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuario".to_string()))?;

        let email = input.email.unwrap_or(current.email);
        self.check_duplicate_email(&email, Some(id)).await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, role = $3
            WHERE id = $4
            RETURNING id, name, email, role, status
            "#,
        )
        .bind(input.name.unwrap_or(current.name))
        .bind(&email)
        .bind(input.role.unwrap_or(current.role))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    /// Toggle a user between Activo and Inactivo
    pub async fn toggle(&self, id: i32) -> AppResult<ToggleOutcome> {
        let (status,): (String,) = sqlx::query_as("SELECT status FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario".to_string()))?;

        let new_status = EntityStatus::parse(&status)
            .map(EntityStatus::toggled)
            .unwrap_or(EntityStatus::Activo);

        sqlx::query("UPDATE users SET status = $1 WHERE id = $2")
            .bind(new_status.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(ToggleOutcome {
            id,
            status: new_status.as_str().to_string(),
        })
    }

    /// Change a user's password
    pub async fn change_password(&self, id: i32, input: ChangePasswordInput) -> AppResult<()> {
        if input.password.is_empty() {
            return Err(AppError::Validation {
                field: "password".to_string(),
                message: "Password is required".to_string(),
                message_es: "Contraseña requerida".to_string(),
            });
        }

        let result = sqlx::query("UPDATE users SET password = $1 WHERE id = $2")
            .bind(&input.password)
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario".to_string()));
        }

        Ok(())
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario".to_string()));
        }

        Ok(())
    }

    async fn check_duplicate_email(&self, email: &str, exclude: Option<i32>) -> AppResult<()> {
        let (duplicates,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM users WHERE email = $1 AND ($2::int IS NULL OR id <> $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.db)
        .await?;

        if duplicates > 0 {
            return Err(AppError::duplicate(
                "A user with that email already exists",
                "Ya existe un usuario con ese email",
            ));
        }

        Ok(())
    }
}
