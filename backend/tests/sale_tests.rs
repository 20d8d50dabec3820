//! Sale creation tests
//!
//! Covers the all-or-nothing validation contract: every line is checked
//! against the catalog before any stock is touched, so one failing line
//! leaves stock and the movement ledger exactly as they were.

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{compute_totals, validate_line_items, LineItem, OrderKind, PurchaseStatus, SaleStatus};

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

/// In-memory catalog entry: (stock, active).
type Catalog = HashMap<String, (i32, bool)>;

/// Movement ledger entry: (product, quantity).
type Ledger = Vec<(String, i32)>;

/// Mirror of the sale-creation flow: validate every line, then debit and
/// log. Any failure aborts before the first mutation.
fn simulate_sale(catalog: &mut Catalog, ledger: &mut Ledger, items: &[LineItem]) -> Result<(), String> {
    validate_line_items(items).map_err(|e| e.to_string())?;

    // Check-then-act: all lines validated before any mutation.
    for line in items {
        let (stock, active) = catalog
            .get(&line.product_name)
            .copied()
            .ok_or_else(|| format!("El producto '{}' no existe", line.product_name))?;
        if !active {
            return Err(format!("El producto '{}' está inactivo", line.product_name));
        }
        if stock < line.quantity {
            return Err(format!(
                "Stock insuficiente para '{}'. Disponible: {}",
                line.product_name, stock
            ));
        }
    }

    for line in items {
        let entry = catalog.get_mut(&line.product_name).expect("validated above");
        entry.0 -= line.quantity;
        ledger.push((line.product_name.clone(), line.quantity));
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn catalog(entries: &[(&str, i32, bool)]) -> Catalog {
        entries
            .iter()
            .map(|(name, stock, active)| (name.to_string(), (*stock, *active)))
            .collect()
    }

    /// The reference sale: debits stock exactly and logs one movement per
    /// line.
    #[test]
    fn test_successful_sale_debits_and_logs() {
        let mut products = catalog(&[("A", 10, true), ("B", 5, true)]);
        let mut ledger = Ledger::new();

        let items = vec![item("A", "100", 2), item("B", "50", 1)];
        simulate_sale(&mut products, &mut ledger, &items).unwrap();

        assert_eq!(products["A"].0, 8);
        assert_eq!(products["B"].0, 4);
        assert_eq!(ledger.len(), 2);

        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);
        assert_eq!(totals.total, dec("297.50"));
    }

    /// Insufficient stock on one line: stock and ledger unchanged
    /// (product stock=3, requested 5).
    #[test]
    fn test_insufficient_stock_leaves_no_trace() {
        let mut products = catalog(&[("A", 3, true)]);
        let mut ledger = Ledger::new();

        let result = simulate_sale(&mut products, &mut ledger, &[item("A", "10", 5)]);

        assert!(result.is_err());
        assert_eq!(products["A"].0, 3);
        assert!(ledger.is_empty());
    }

    /// One bad line poisons the whole order: the valid first line must not
    /// be debited either.
    #[test]
    fn test_partial_failure_rolls_back_everything() {
        let mut products = catalog(&[("A", 10, true), ("B", 1, true)]);
        let mut ledger = Ledger::new();

        let items = vec![item("A", "10", 2), item("B", "10", 5)];
        let result = simulate_sale(&mut products, &mut ledger, &items);

        assert!(result.is_err());
        assert_eq!(products["A"].0, 10);
        assert_eq!(products["B"].0, 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_unknown_product_rejected() {
        let mut products = catalog(&[("A", 10, true)]);
        let mut ledger = Ledger::new();

        let result = simulate_sale(&mut products, &mut ledger, &[item("Z", "10", 1)]);

        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_inactive_product_rejected() {
        let mut products = catalog(&[("A", 10, false)]);
        let mut ledger = Ledger::new();

        let result = simulate_sale(&mut products, &mut ledger, &[item("A", "10", 1)]);

        assert!(result.is_err());
        assert_eq!(products["A"].0, 10);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_empty_order_rejected() {
        let mut products = catalog(&[("A", 10, true)]);
        let mut ledger = Ledger::new();

        assert!(simulate_sale(&mut products, &mut ledger, &[]).is_err());
    }

    /// Exact depletion is a valid sale.
    #[test]
    fn test_sale_can_deplete_stock_exactly() {
        let mut products = catalog(&[("A", 5, true)]);
        let mut ledger = Ledger::new();

        simulate_sale(&mut products, &mut ledger, &[item("A", "10", 5)]).unwrap();
        assert_eq!(products["A"].0, 0);
    }

    #[test]
    fn test_sales_are_born_complete() {
        assert_eq!(SaleStatus::Completada.as_str(), "Completada");
    }

    /// Purchases confirm receipt without touching stock; the machine only
    /// allows Pendiente -> Recibido.
    #[test]
    fn test_purchase_status_machine() {
        assert!(PurchaseStatus::Pendiente.can_become(PurchaseStatus::Recibido));
        assert!(!PurchaseStatus::Recibido.can_become(PurchaseStatus::Pendiente));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn line_strategy() -> impl Strategy<Value = LineItem> {
        ((1i64..=10_000i64), (1i32..=20)).prop_map(|(cents, quantity)| LineItem {
            product_name: "A".to_string(),
            price: Decimal::new(cents, 2),
            quantity,
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// A sale either debits every line exactly or changes nothing at
        /// all; the ledger gains one row per debited line.
        #[test]
        fn prop_all_or_nothing(
            stock in 0i32..=40,
            lines in prop::collection::vec(line_strategy(), 1..5)
        ) {
            let mut products: Catalog =
                [("A".to_string(), (stock, true))].into_iter().collect();
            let mut ledger = Ledger::new();

            let requested: i32 = lines.iter().map(|l| l.quantity).sum();
            let result = simulate_sale(&mut products, &mut ledger, &lines);

            if result.is_ok() {
                prop_assert_eq!(products["A"].0, stock - requested);
                prop_assert_eq!(ledger.len(), lines.len());
            } else {
                prop_assert_eq!(products["A"].0, stock);
                prop_assert!(ledger.is_empty());
            }
            prop_assert!(products["A"].0 >= 0);
        }

        /// Accepted sales never drive stock negative.
        #[test]
        fn prop_stock_floor_after_sales(
            stock in 0i32..=100,
            batches in prop::collection::vec(
                prop::collection::vec(line_strategy(), 1..3),
                1..10
            )
        ) {
            let mut products: Catalog =
                [("A".to_string(), (stock, true))].into_iter().collect();
            let mut ledger = Ledger::new();

            for batch in batches {
                let _ = simulate_sale(&mut products, &mut ledger, &batch);
                prop_assert!(products["A"].0 >= 0);
            }
        }
    }
}
