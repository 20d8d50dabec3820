//! Shared types and domain logic for the Melkar business management platform
//!
//! This crate contains the pure domain pieces used by the backend: product
//! stock labels, inventory movement directions, order totals computation and
//! the per-kind order status machines. Nothing in here touches the database.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
