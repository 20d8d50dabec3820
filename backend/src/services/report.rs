//! Sales reporting service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use shared::DateRange;

use crate::error::AppResult;

/// Reporting service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// One row of the sales report
#[derive(Debug, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    pub id: i32,
    pub client_name: String,
    pub total: Decimal,
    pub status: String,
    #[serde(rename = "fecha")]
    pub fecha: NaiveDate,
}

/// Sales report: rows plus the grand total
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub sales: Vec<SalesReportRow>,
    pub total_general: Decimal,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the sales report for a date range (`to` inclusive of the day)
    pub async fn sales(&self, range: DateRange) -> AppResult<SalesReport> {
        let rows = sqlx::query_as::<_, SalesReportRow>(
            r#"
            SELECT id, client_name, total, status, created_at::date AS fecha
            FROM sales
            WHERE ($1::date IS NULL OR created_at >= $1)
              AND ($2::date IS NULL OR created_at < $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(range.from)
        .bind(range.to_exclusive())
        .fetch_all(&self.db)
        .await?;

        let total_general = rows.iter().map(|r| r.total).sum();

        Ok(SalesReport {
            sales: rows,
            total_general,
        })
    }
}
