//! Role management service
//!
//! Permissions are stored as a comma-joined list of page keys, the contract
//! the original frontend expects. System roles (the administrator) cannot be
//! modified or deleted, and a role still assigned to users cannot be
//! deleted.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use shared::{validate_required_name, EntityStatus};

use crate::error::{AppError, AppResult};

/// Permission granted to every role that has nothing else.
const DEFAULT_PERMISSIONS: &str = "dashboard";

/// Role service
#[derive(Clone)]
pub struct RoleService {
    db: PgPool,
}

/// Role row as stored
#[derive(Debug, FromRow)]
struct RoleRow {
    id: i32,
    name: String,
    permissions: String,
    is_system: bool,
    status: String,
}

/// Role record with permissions split out
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub permissions: Vec<String>,
    pub is_system: bool,
    pub status: String,
}

/// Input for creating a role
#[derive(Debug, Deserialize)]
pub struct CreateRoleInput {
    pub name: String,
    pub permissions: Option<Vec<String>>,
}

/// Input for updating a role
#[derive(Debug, Deserialize)]
pub struct UpdateRoleInput {
    pub name: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl RoleService {
    /// Create a new RoleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all roles
    pub async fn list(&self) -> AppResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, permissions, is_system, status FROM roles ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(to_role).collect())
    }

    /// Create a role. Names are unique case-insensitively.
    pub async fn create(&self, input: CreateRoleInput) -> AppResult<Role> {
        validate_required_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: "Name is required".to_string(),
            message_es: msg.to_string(),
        })?;

        let (duplicates,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM roles WHERE UPPER(name) = UPPER($1)")
                .bind(&input.name)
                .fetch_one(&self.db)
                .await?;
        if duplicates > 0 {
            return Err(AppError::duplicate(
                "A role with that name already exists",
                "Ya existe un rol con ese nombre",
            ));
        }

        let permissions = join_permissions(input.permissions);

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            INSERT INTO roles (name, permissions, is_system, status)
            VALUES ($1, $2, false, $3)
            RETURNING id, name, permissions, is_system, status
            "#,
        )
        .bind(&input.name)
        .bind(&permissions)
        .bind(EntityStatus::Activo.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(to_role(row))
    }

    /// Update a role. System roles are off limits.
    pub async fn update(&self, id: i32, input: UpdateRoleInput) -> AppResult<Role> {
        let current = self.fetch(id).await?;

        if current.is_system {
            return Err(AppError::conflict(
                "The administrator role cannot be modified",
                "No se puede modificar el rol de Administrador",
            ));
        }

        let name = input.name.unwrap_or(current.name);
        let permissions = match input.permissions {
            Some(perms) => join_permissions(Some(perms)),
            None => current.permissions,
        };

        let row = sqlx::query_as::<_, RoleRow>(
            r#"
            UPDATE roles
            SET name = $1, permissions = $2
            WHERE id = $3
            RETURNING id, name, permissions, is_system, status
            "#,
        )
        .bind(&name)
        .bind(&permissions)
        .bind(id)
        .fetch_one(&self.db)
        .await?;

        Ok(to_role(row))
    }

    /// Delete a role. System roles and roles still assigned to users are
    /// protected.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let current = self.fetch(id).await?;

        if current.is_system {
            return Err(AppError::conflict(
                "The administrator role cannot be deleted",
                "No se puede eliminar el rol de Administrador",
            ));
        }

        let (assigned,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(&current.name)
            .fetch_one(&self.db)
            .await?;
        if assigned > 0 {
            return Err(AppError::conflict(
                "The role is still assigned to users",
                "No se puede eliminar: hay usuarios con este rol",
            ));
        }

        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(())
    }

    async fn fetch(&self, id: i32) -> AppResult<RoleRow> {
        sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, permissions, is_system, status FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Rol".to_string()))
    }
}

fn join_permissions(permissions: Option<Vec<String>>) -> String {
    match permissions {
        Some(perms) if !perms.is_empty() => perms.join(","),
        _ => DEFAULT_PERMISSIONS.to_string(),
    }
}

fn to_role(row: RoleRow) -> Role {
    Role {
        id: row.id,
        name: row.name,
        permissions: row
            .permissions
            .split(',')
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect(),
        is_system: row.is_system,
        status: row.status,
    }
}
