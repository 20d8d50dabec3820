//! HTTP handlers for the Melkar backend

use serde::Serialize;

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod employee;
pub mod health;
pub mod inventory;
pub mod product;
pub mod purchase;
pub mod quote;
pub mod report;
pub mod role;
pub mod sale;
pub mod supplier;
pub mod user;

pub use auth::*;
pub use client::*;
pub use dashboard::*;
pub use employee::*;
pub use health::*;
pub use inventory::*;
pub use product::*;
pub use purchase::*;
pub use quote::*;
pub use report::*;
pub use role::*;
pub use sale::*;
pub use supplier::*;
pub use user::*;

/// Deletion confirmation message shared by the delete endpoints
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}
