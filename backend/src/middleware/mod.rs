//! Request middleware

pub mod context;

pub use context::{context_middleware, AdminRole, RequestContext};
