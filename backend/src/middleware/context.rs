//! Request context middleware
//!
//! The client identifies its role with a plain `X-User-Role` header. That is
//! a behavioral contract inherited from the original system, not a security
//! boundary. The header is read exactly once, here, into a typed
//! [`RequestContext`]; services never look at headers themselves.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;

/// Roles allowed to manage users and roles.
const ADMIN_ROLES: &[&str] = &["Administrador", "Admin"];

/// Per-request context populated from the `X-User-Role` header.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
    pub role: Option<String>,
}

impl RequestContext {
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| ADMIN_ROLES.contains(&r))
    }
}

/// Middleware that extracts the caller's role into a request extension.
pub async fn context_middleware(mut request: Request, next: Next) -> Response {
    let role = request
        .headers()
        .get("x-user-role")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    request.extensions_mut().insert(RequestContext { role });

    next.run(request).await
}

/// Extractor that rejects requests whose role is not an administrator.
///
/// Use as a handler argument on guarded operations (user and role
/// management).
#[derive(Clone, Debug)]
pub struct AdminRole(pub String);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AdminRole
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default();

        if context.is_admin() {
            Ok(AdminRole(context.role.unwrap_or_default()))
        } else {
            Err(AppError::Forbidden)
        }
    }
}
