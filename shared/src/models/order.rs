//! Order line items, totals computation and status machines
//!
//! Sales, purchases and quotes share the same line-item shape and the same
//! totals arithmetic; the differences (tax, editability, lifecycle) are
//! captured by [`OrderKind`] and the per-kind status enums.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed 19% VAT applied to sales and quotes.
pub fn tax_rate() -> Decimal {
    Decimal::new(19, 2)
}

/// Round a monetary amount to 2 decimals, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// A line item inside an order.
///
/// The product name and unit price are point-in-time snapshots, deliberately
/// not foreign keys: renaming or repricing a product later must not rewrite
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(alias = "name")]
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// The three order kinds handled by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Sale,
    Purchase,
    Quote,
}

impl OrderKind {
    /// Purchases carry no tax line; sales and quotes do.
    pub fn includes_tax(&self) -> bool {
        !matches!(self, OrderKind::Purchase)
    }
}

/// Computed order totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute subtotal, tax and total for an order.
///
/// The subtotal is the exact sum of `price * quantity` with no intermediate
/// rounding; tax and total are rounded to cents, half away from zero. All
/// arithmetic stays in `Decimal` so repeated edits never accumulate drift.
pub fn compute_totals(items: &[LineItem], transport: Decimal, kind: OrderKind) -> OrderTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|i| i.price * Decimal::from(i.quantity))
        .sum();

    let tax = if kind.includes_tax() {
        round_money(subtotal * tax_rate())
    } else {
        Decimal::ZERO
    };

    let total = round_money(subtotal + tax + transport);

    OrderTotals {
        subtotal,
        tax,
        total,
    }
}

/// Quote lifecycle: a draft can be edited and sent; a sent quote is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteStatus {
    #[serde(rename = "Borrador")]
    Borrador,
    #[serde(rename = "Enviada")]
    Enviada,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Borrador => "Borrador",
            QuoteStatus::Enviada => "Enviada",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Borrador" => Some(QuoteStatus::Borrador),
            "Enviada" => Some(QuoteStatus::Enviada),
            _ => None,
        }
    }

    /// Only draft quotes may have their items replaced.
    pub fn is_editable(&self) -> bool {
        matches!(self, QuoteStatus::Borrador)
    }

    /// Only draft quotes may be sent.
    pub fn can_send(&self) -> bool {
        matches!(self, QuoteStatus::Borrador)
    }
}

/// Purchase lifecycle: created pending, confirmed received.
///
/// Receipt confirmation is bookkeeping only; stock is credited when the
/// purchase is created, not when it flips to Recibido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    #[serde(rename = "Pendiente")]
    Pendiente,
    #[serde(rename = "Recibido")]
    Recibido,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Pendiente => "Pendiente",
            PurchaseStatus::Recibido => "Recibido",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pendiente" => Some(PurchaseStatus::Pendiente),
            "Recibido" => Some(PurchaseStatus::Recibido),
            _ => None,
        }
    }

    pub fn can_become(&self, next: PurchaseStatus) -> bool {
        matches!(
            (self, next),
            (PurchaseStatus::Pendiente, PurchaseStatus::Recibido)
        )
    }
}

/// Sale lifecycle: sales are created already complete and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    #[serde(rename = "Completada")]
    Completada,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        "Completada"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(name: &str, price: &str, quantity: i32) -> LineItem {
        LineItem {
            product_name: name.to_string(),
            price: dec(price),
            quantity,
        }
    }

    #[test]
    fn test_sale_totals_worked_example() {
        let items = vec![item("A", "100", 2), item("B", "50", 1)];
        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);

        assert_eq!(totals.subtotal, dec("250"));
        assert_eq!(totals.tax, dec("47.50"));
        assert_eq!(totals.total, dec("297.50"));
    }

    #[test]
    fn test_purchase_totals_carry_no_tax() {
        let items = vec![item("A", "99.99", 3)];
        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Purchase);

        assert_eq!(totals.subtotal, dec("299.97"));
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, dec("299.97"));
    }

    #[test]
    fn test_transport_included_in_total() {
        let items = vec![item("A", "100", 1)];
        let totals = compute_totals(&items, dec("15.50"), OrderKind::Quote);

        assert_eq!(totals.subtotal, dec("100"));
        assert_eq!(totals.tax, dec("19.00"));
        assert_eq!(totals.total, dec("134.50"));
    }

    #[test]
    fn test_tax_rounds_half_up_at_cent_boundary() {
        // 0.50 * 0.19 = 0.095 -> 0.10 with half-away-from-zero
        let items = vec![item("A", "0.50", 1)];
        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);

        assert_eq!(totals.tax, dec("0.10"));
        assert_eq!(totals.total, dec("0.60"));
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        let totals = compute_totals(&[], Decimal::ZERO, OrderKind::Sale);
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_quote_transitions() {
        assert!(QuoteStatus::Borrador.is_editable());
        assert!(QuoteStatus::Borrador.can_send());
        assert!(!QuoteStatus::Enviada.is_editable());
        assert!(!QuoteStatus::Enviada.can_send());
    }

    #[test]
    fn test_purchase_transitions() {
        assert!(PurchaseStatus::Pendiente.can_become(PurchaseStatus::Recibido));
        assert!(!PurchaseStatus::Recibido.can_become(PurchaseStatus::Pendiente));
        assert!(!PurchaseStatus::Pendiente.can_become(PurchaseStatus::Pendiente));
        assert!(!PurchaseStatus::Recibido.can_become(PurchaseStatus::Recibido));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(QuoteStatus::parse("Borrador"), Some(QuoteStatus::Borrador));
        assert_eq!(QuoteStatus::parse("Enviada"), Some(QuoteStatus::Enviada));
        assert_eq!(QuoteStatus::parse("borrador"), None);
        assert_eq!(
            PurchaseStatus::parse("Pendiente"),
            Some(PurchaseStatus::Pendiente)
        );
        assert_eq!(
            PurchaseStatus::parse("Recibido"),
            Some(PurchaseStatus::Recibido)
        );
    }
}
