//! Order totals tests
//!
//! Covers the totals engine shared by sales, quotes and purchases:
//! exact subtotals, 19% VAT rounded half-up to cents, tax-free purchases,
//! and the total invariant under arbitrary line-item sets.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{compute_totals, round_money, tax_rate, LineItem, OrderKind};

// Helper to create Decimal from string
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

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The worked example from the sales flow: A 100x2 + B 50x1, no
    /// transport.
    #[test]
    fn test_sale_reference_values() {
        let items = vec![item("A", "100", 2), item("B", "50", 1)];
        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);

        assert_eq!(totals.subtotal, dec("250"));
        assert_eq!(totals.tax, dec("47.50"));
        assert_eq!(totals.total, dec("297.50"));
    }

    /// Recomputing the same items yields identical values.
    #[test]
    fn test_totals_are_deterministic() {
        let items = vec![item("A", "100", 2), item("B", "50", 1)];
        let first = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);
        let second = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);

        assert_eq!(first, second);
    }

    /// Quote edit scenario: replacing [A 100x1] with [A 100x3, B 20x2]
    /// moves the subtotal from 100 to 340.
    #[test]
    fn test_item_replacement_recomputes_subtotal() {
        let before = compute_totals(&[item("A", "100", 1)], Decimal::ZERO, OrderKind::Quote);
        assert_eq!(before.subtotal, dec("100"));

        let after = compute_totals(
            &[item("A", "100", 3), item("B", "20", 2)],
            Decimal::ZERO,
            OrderKind::Quote,
        );
        assert_eq!(after.subtotal, dec("340"));
        assert_eq!(after.tax, dec("64.60"));
        assert_eq!(after.total, dec("404.60"));
    }

    /// Purchases never carry a tax line.
    #[test]
    fn test_purchase_tax_is_zero() {
        let items = vec![item("A", "37.99", 7), item("B", "120", 2)];
        let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Purchase);

        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, round_money(totals.subtotal));
    }

    /// Transport participates in the total but not in the tax base.
    #[test]
    fn test_transport_excluded_from_tax_base() {
        let items = vec![item("A", "200", 1)];
        let with_transport = compute_totals(&items, dec("50"), OrderKind::Sale);
        let without_transport = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);

        assert_eq!(with_transport.tax, without_transport.tax);
        assert_eq!(with_transport.total, without_transport.total + dec("50"));
    }

    /// Half-up rounding at the cent boundary: 0.095 rounds to 0.10.
    #[test]
    fn test_tax_rounds_half_away_from_zero() {
        let totals = compute_totals(&[item("A", "0.50", 1)], Decimal::ZERO, OrderKind::Sale);
        assert_eq!(totals.tax, dec("0.10"));
    }

    /// The subtotal keeps full precision; only tax and total are rounded.
    #[test]
    fn test_subtotal_not_rounded() {
        let totals = compute_totals(&[item("A", "0.333", 3)], Decimal::ZERO, OrderKind::Sale);
        assert_eq!(totals.subtotal, dec("0.999"));
    }

    #[test]
    fn test_tax_rate_is_19_percent() {
        assert_eq!(tax_rate(), dec("0.19"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating prices in cents (0.01 to 10000.00)
    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 2))
    }

    /// Strategy for generating quantities
    fn quantity_strategy() -> impl Strategy<Value = i32> {
        1i32..=500
    }

    /// Strategy for generating line-item sets
    fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec(
            (price_strategy(), quantity_strategy()).prop_map(|(price, quantity)| LineItem {
                product_name: "P".to_string(),
                price,
                quantity,
            }),
            1..10,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// total == round(subtotal + tax + transport, 2) for every taxed
        /// order kind.
        #[test]
        fn prop_total_invariant_taxed(
            items in items_strategy(),
            transport in price_strategy()
        ) {
            let totals = compute_totals(&items, transport, OrderKind::Sale);
            prop_assert_eq!(
                totals.total,
                round_money(totals.subtotal + totals.tax + transport)
            );
        }

        /// tax == round(subtotal * 0.19, 2) for sales and quotes.
        #[test]
        fn prop_tax_invariant(items in items_strategy()) {
            let sale = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);
            let quote = compute_totals(&items, Decimal::ZERO, OrderKind::Quote);

            prop_assert_eq!(sale.tax, round_money(sale.subtotal * tax_rate()));
            prop_assert_eq!(quote.tax, sale.tax);
        }

        /// Purchases always compute a zero tax line.
        #[test]
        fn prop_purchase_tax_zero(items in items_strategy()) {
            let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Purchase);
            prop_assert_eq!(totals.tax, Decimal::ZERO);
            prop_assert_eq!(totals.total, round_money(totals.subtotal));
        }

        /// The subtotal is the exact sum of price * quantity.
        #[test]
        fn prop_subtotal_exact_sum(items in items_strategy()) {
            let expected: Decimal = items
                .iter()
                .map(|i| i.price * Decimal::from(i.quantity))
                .sum();
            let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);
            prop_assert_eq!(totals.subtotal, expected);
        }

        /// Totals never go negative for valid inputs.
        #[test]
        fn prop_totals_non_negative(
            items in items_strategy(),
            transport in price_strategy()
        ) {
            let totals = compute_totals(&items, transport, OrderKind::Sale);
            prop_assert!(totals.subtotal >= Decimal::ZERO);
            prop_assert!(totals.tax >= Decimal::ZERO);
            prop_assert!(totals.total >= Decimal::ZERO);
        }

        /// Tax and total always land on cent precision.
        #[test]
        fn prop_rounded_to_cents(items in items_strategy()) {
            let totals = compute_totals(&items, Decimal::ZERO, OrderKind::Sale);
            prop_assert_eq!(totals.tax, totals.tax.round_dp(2));
            prop_assert_eq!(totals.total, totals.total.round_dp(2));
        }
    }
}
