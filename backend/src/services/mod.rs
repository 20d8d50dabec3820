//! Business logic services for the Melkar backend

pub mod auth;
pub mod client;
pub mod dashboard;
pub mod employee;
pub mod inventory;
pub mod product;
pub mod purchase;
pub mod quote;
pub mod report;
pub mod role;
pub mod sale;
pub mod supplier;
pub mod user;

pub use auth::AuthService;
pub use client::ClientService;
pub use dashboard::DashboardService;
pub use employee::EmployeeService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use purchase::PurchaseService;
pub use quote::QuoteService;
pub use report::ReportService;
pub use role::RoleService;
pub use sale::SaleService;
pub use supplier::SupplierService;
pub use user::UserService;
