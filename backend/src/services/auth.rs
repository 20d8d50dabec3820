//! Authentication service
//!
//! Reproduces the source system's contract: plaintext credential match on
//! login, permissions resolved from the roles table with hard-coded
//! fallbacks, and a forgot-password flow that hands a 6-digit temporary
//! password straight back to the caller. None of this is a security
//! boundary and hardening it is explicitly out of scope.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
}

/// Input for the login endpoint
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authenticated user payload
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub permissions: Vec<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: AuthenticatedUser,
}

/// Input for the forgot-password endpoint
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordInput {
    #[serde(default)]
    pub email: String,
}

/// Forgot-password response; the temporary password is returned to the
/// caller, as the original system does.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub message: String,
    pub temp_password: String,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    name: String,
    email: String,
    role: String,
    status: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Authenticate a user by email and password
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let user = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, role, status
            FROM users
            WHERE email = $1 AND password = $2
            "#,
        )
        .bind(&input.email)
        .bind(&input.password)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if user.status == "Inactivo" {
            return Err(AppError::InactiveUser);
        }

        let permissions = self.permissions_for(&user.role).await?;

        Ok(LoginResponse {
            message: "Login exitoso".to_string(),
            user: AuthenticatedUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
                permissions,
            },
        })
    }

    /// Reset a user's password to a random 6-digit code
    pub async fn forgot_password(&self, input: ForgotPasswordInput) -> AppResult<ForgotPasswordResponse> {
        if input.email.is_empty() {
            return Err(AppError::Validation {
                field: "email".to_string(),
                message: "Email is required".to_string(),
                message_es: "Email requerido".to_string(),
            });
        }

        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
            .bind(&input.email)
            .fetch_optional(&self.db)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Usuario".to_string()));
        }

        let temp_password = rand::thread_rng().gen_range(100_000..1_000_000).to_string();

        sqlx::query("UPDATE users SET password = $1 WHERE email = $2")
            .bind(&temp_password)
            .bind(&input.email)
            .execute(&self.db)
            .await?;

        Ok(ForgotPasswordResponse {
            message: "Se ha restablecido su contraseña".to_string(),
            temp_password,
        })
    }

    /// Resolve a role's permission list from the roles table, falling back
    /// to the original system's per-role defaults when the role is unknown.
    async fn permissions_for(&self, role: &str) -> AppResult<Vec<String>> {
        let stored: Option<(String,)> =
            sqlx::query_as("SELECT permissions FROM roles WHERE name = $1")
                .bind(role)
                .fetch_optional(&self.db)
                .await?;

        let joined = match stored {
            Some((permissions,)) if !permissions.is_empty() => permissions,
            Some(_) => "dashboard".to_string(),
            None => default_permissions(role).to_string(),
        };

        Ok(joined
            .split(',')
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect())
    }
}

/// Fallback permission sets for roles missing from the roles table.
fn default_permissions(role: &str) -> &'static str {
    match role {
        "Administrador" | "Admin" => {
            "dashboard,productos,proveedores,inventario,compras,clientes,cotizaciones,ventas,reportes,empleados,roles,usuarios"
        }
        "Vendedor" | "Ventas" => "dashboard,clientes,cotizaciones,ventas",
        "Gerente" => "dashboard,reportes,empleados,inventario",
        _ => "dashboard",
    }
}
