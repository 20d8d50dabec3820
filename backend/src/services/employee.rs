//! Employee management service

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{validate_required_name, EntityStatus};

use crate::error::{AppError, AppResult};

/// Employee service
#[derive(Clone)]
pub struct EmployeeService {
    db: PgPool,
}

/// Employee record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub document: String,
    pub phone: String,
    pub email: String,
    pub position: String,
    pub status: String,
}

/// Input for creating an employee
#[derive(Debug, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
}

/// Input for updating an employee
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeInput {
    pub name: Option<String>,
    pub document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
}

/// Outcome of toggling an employee's status
#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub id: i32,
    pub status: String,
}

impl EmployeeService {
    /// Create a new EmployeeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List employees, optionally filtered by status
    pub async fn list(&self, status: Option<&str>) -> AppResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, document, phone, email, position, status
            FROM employees
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(&self.db)
        .await?;

        Ok(employees)
    }

    /// Create an employee
    pub async fn create(&self, input: CreateEmployeeInput) -> AppResult<Employee> {
        validate_required_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
            message_es: msg.to_string(),
        })?;

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees (name, document, phone, email, position, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, document, phone, email, position, status
            "#,
        )
        .bind(&input.name)
        .bind(&input.document)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.position)
        .bind(EntityStatus::Activo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(employee)
    }

    /// Update an employee; omitted fields keep their current values
    pub async fn update(&self, id: i32, input: UpdateEmployeeInput) -> AppResult<Employee> {
        let current = sqlx::query_as::<_, Employee>(
            "SELECT id, name, document, phone, email, position, status FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Empleado".to_string()))?;

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE employees
            SET name = $1, document = $2, phone = $3, email = $4, position = $5
            WHERE id = $6
            RETURNING id, name, document, phone, email, position, status
            "#,
        )
        .bind(input.name.unwrap_or(current.name))
        .bind(input.document.unwrap_or(current.document))
        .bind(input.phone.unwrap_or(current.phone))
        .bind(input.email.unwrap_or(current.email))
        .bind(input.position.unwrap_or(current.position))
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(employee)
    }

    /// Toggle an employee between Activo and Inactivo
    pub async fn toggle(&self, id: i32) -> AppResult<ToggleOutcome> {
        let (status,): (String,) = sqlx::query_as("SELECT status FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Empleado".to_string()))?;

        let new_status = EntityStatus::parse(&status)
            .map(EntityStatus::toggled)
            .unwrap_or(EntityStatus::Activo);

        sqlx::query("UPDATE employees SET status = $1 WHERE id = $2")
            .bind(new_status.as_str())
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(ToggleOutcome {
            id,
            status: new_status.as_str().to_string(),
        })
    }

    /// Delete an employee
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Empleado".to_string()));
        }

        Ok(())
    }
}
