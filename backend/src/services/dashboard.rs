//! Dashboard statistics service

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use shared::AlertLevel;

use crate::error::AppResult;

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Headline figures for the dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sales: Decimal,
    pub total_stock: i64,
    pub active_quotes: i64,
    pub active_purchases: i64,
    pub weekly_trend: Vec<i32>,
}

/// Low-stock alert entry
#[derive(Debug, Serialize)]
pub struct LowStockAlert {
    pub id: i32,
    pub name: String,
    pub stock: i32,
    pub status: String,
}

/// Full dashboard payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub low_stock_alerts: Vec<LowStockAlert>,
}

#[derive(Debug, FromRow)]
struct LowStockRow {
    id: i32,
    name: String,
    stock: i32,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Gather dashboard statistics and low-stock alerts
    pub async fn stats(&self) -> AppResult<DashboardView> {
        let (total_stock,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(stock), 0) FROM products WHERE active = true")
                .fetch_one(&self.db)
                .await?;

        let (active_quotes,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM quotes WHERE status IN ('Borrador', 'Enviada')")
                .fetch_one(&self.db)
                .await?;

        let (active_purchases,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM purchases WHERE status = 'Pendiente'")
                .fetch_one(&self.db)
                .await?;

        let (total_sales,): (Decimal,) =
            sqlx::query_as("SELECT COALESCE(SUM(total), 0) FROM sales")
                .fetch_one(&self.db)
                .await?;

        let low_stock = sqlx::query_as::<_, LowStockRow>(
            r#"
            SELECT id, name, stock
            FROM products
            WHERE active = true AND stock >= 0 AND stock <= 10
            ORDER BY stock
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardView {
            stats: DashboardStats {
                total_sales,
                total_stock,
                active_quotes,
                active_purchases,
                // Static placeholder series rendered by the dashboard chart.
                weekly_trend: vec![40, 60, 50, 45, 100, 70, 80],
            },
            low_stock_alerts: low_stock
                .into_iter()
                .map(|row| LowStockAlert {
                    id: row.id,
                    name: row.name,
                    stock: row.stock,
                    status: AlertLevel::from_stock(row.stock).as_str().to_string(),
                })
                .collect(),
        })
    }
}
