//! Route definitions for the Melkar backend

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Authentication
        .nest("/auth", auth_routes())
        // Dashboard
        .nest("/dashboard", dashboard_routes())
        // Product catalog
        .nest("/products", product_routes())
        // Suppliers
        .nest("/suppliers", supplier_routes())
        // Clients
        .nest("/clients", client_routes())
        // Users (mutations admin-guarded at the handler level)
        .nest("/users", user_routes())
        // Roles (mutations admin-guarded at the handler level)
        .nest("/roles", role_routes())
        // Employees
        .nest("/employees", employee_routes())
        // Quotes
        .nest("/quotes", quote_routes())
        // Purchases
        .nest("/purchases", purchase_routes())
        // Inventory
        .nest("/inventory", inventory_routes())
        // Sales
        .nest("/sales", sale_routes())
        // Reports
        .nest("/reports", report_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/forgot-password", post(handlers::forgot_password))
}

/// Dashboard routes
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/stats", get(handlers::get_dashboard_stats))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/toggle", put(handlers::toggle_product))
        .route("/:product_id/restock", post(handlers::restock_product))
}

/// Supplier routes
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/:supplier_id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route("/:supplier_id/toggle", put(handlers::toggle_supplier))
}

/// Client routes
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/:client_id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route("/:client_id/toggle", put(handlers::toggle_client))
}

/// User management routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/:user_id",
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .route("/:user_id/toggle", put(handlers::toggle_user))
        .route("/:user_id/password", put(handlers::change_user_password))
}

/// Role management routes
fn role_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_roles).post(handlers::create_role))
        .route(
            "/:role_id",
            put(handlers::update_role).delete(handlers::delete_role),
        )
}

/// Employee routes
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route(
            "/:employee_id",
            put(handlers::update_employee).delete(handlers::delete_employee),
        )
        .route("/:employee_id/toggle", put(handlers::toggle_employee))
}

/// Quote routes
fn quote_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_quotes).post(handlers::create_quote))
        .route("/:quote_id", put(handlers::update_quote))
        .route("/:quote_id/send", post(handlers::send_quote))
}

/// Purchase routes
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_purchases).post(handlers::create_purchase),
        )
        .route(
            "/:purchase_id/status",
            patch(handlers::update_purchase_status),
        )
}

/// Inventory routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::get_inventory_stats))
        .route("/products", get(handlers::list_inventory_products))
        .route(
            "/movements",
            get(handlers::list_movements).post(handlers::record_movement),
        )
}

/// Sales routes
fn sale_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::list_sales).post(handlers::create_sale))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/sales", get(handlers::get_sales_report))
}
