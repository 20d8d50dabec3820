//! Product stock labels

use serde::{Deserialize, Serialize};

/// Derived stock status label for a product.
///
/// The label is always a pure function of the current stock count and is
/// recomputed on every stock mutation; a stored value must never diverge
/// from `StockStatus::from_stock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "En Stock")]
    EnStock,
    #[serde(rename = "Stock Bajo")]
    StockBajo,
    #[serde(rename = "Sin Stock")]
    SinStock,
}

impl StockStatus {
    /// Classify a stock count: more than 10 units is "En Stock", 1–10 is
    /// "Stock Bajo", zero or less is "Sin Stock".
    pub fn from_stock(stock: i32) -> Self {
        if stock > 10 {
            StockStatus::EnStock
        } else if stock > 0 {
            StockStatus::StockBajo
        } else {
            StockStatus::SinStock
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::EnStock => "En Stock",
            StockStatus::StockBajo => "Stock Bajo",
            StockStatus::SinStock => "Sin Stock",
        }
    }
}

/// Severity label for low-stock dashboard alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    #[serde(rename = "Crítico")]
    Critico,
    #[serde(rename = "Bajo")]
    Bajo,
}

impl AlertLevel {
    /// Three units or fewer is critical; anything else in the low band is
    /// merely low.
    pub fn from_stock(stock: i32) -> Self {
        if stock <= 3 {
            AlertLevel::Critico
        } else {
            AlertLevel::Bajo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critico => "Crítico",
            AlertLevel::Bajo => "Bajo",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(StockStatus::from_stock(11), StockStatus::EnStock);
        assert_eq!(StockStatus::from_stock(10), StockStatus::StockBajo);
        assert_eq!(StockStatus::from_stock(1), StockStatus::StockBajo);
        assert_eq!(StockStatus::from_stock(0), StockStatus::SinStock);
        assert_eq!(StockStatus::from_stock(-2), StockStatus::SinStock);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(StockStatus::from_stock(50).as_str(), "En Stock");
        assert_eq!(StockStatus::from_stock(5).as_str(), "Stock Bajo");
        assert_eq!(StockStatus::from_stock(0).as_str(), "Sin Stock");
    }

    #[test]
    fn test_alert_levels() {
        assert_eq!(AlertLevel::from_stock(0), AlertLevel::Critico);
        assert_eq!(AlertLevel::from_stock(3), AlertLevel::Critico);
        assert_eq!(AlertLevel::from_stock(4), AlertLevel::Bajo);
        assert_eq!(AlertLevel::from_stock(10), AlertLevel::Bajo);
    }
}
