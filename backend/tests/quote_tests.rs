//! Quote lifecycle tests
//!
//! Covers the Borrador/Enviada state machine, draft-only editability, and
//! the full-replacement semantics of item edits.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{compute_totals, round_money, LineItem, OrderKind, QuoteStatus};

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

/// Replacement semantics: the new set fully replaces the old one and the
/// totals come from the new set alone.
fn replace_items(_old: &[LineItem], new: Vec<LineItem>, transport: Decimal) -> (Vec<LineItem>, Decimal) {
    let totals = compute_totals(&new, transport, OrderKind::Quote);
    (new, totals.subtotal)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Editing [A 100x1] into [A 100x3, B 20x2] moves the subtotal from 100
    /// to 340 and leaves no trace of the old line set.
    #[test]
    fn test_replace_items_recomputes_totals() {
        let old = vec![item("A", "100", 1)];
        let before = compute_totals(&old, Decimal::ZERO, OrderKind::Quote);
        assert_eq!(before.subtotal, dec("100"));

        let (items, subtotal) = replace_items(
            &old,
            vec![item("A", "100", 3), item("B", "20", 2)],
            Decimal::ZERO,
        );

        assert_eq!(subtotal, dec("340"));
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.quantity > 1));
    }

    /// A replacement with a single line leaves exactly that line.
    #[test]
    fn test_replace_items_no_orphans() {
        let old = vec![item("A", "100", 1), item("B", "20", 2)];
        let (items, subtotal) = replace_items(&old, vec![item("C", "10", 1)], Decimal::ZERO);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_name, "C");
        assert_eq!(subtotal, dec("10"));
    }

    #[test]
    fn test_draft_is_editable_and_sendable() {
        assert!(QuoteStatus::Borrador.is_editable());
        assert!(QuoteStatus::Borrador.can_send());
    }

    /// Enviada is terminal: no edits, no re-send.
    #[test]
    fn test_sent_quote_is_terminal() {
        assert!(!QuoteStatus::Enviada.is_editable());
        assert!(!QuoteStatus::Enviada.can_send());
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [QuoteStatus::Borrador, QuoteStatus::Enviada] {
            assert_eq!(QuoteStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QuoteStatus::parse("Completada"), None);
    }

    /// A transport change alone must still re-derive the total so the
    /// invariant total == round(subtotal + tax + transport) holds.
    #[test]
    fn test_transport_change_rederives_total() {
        let items = vec![item("A", "100", 1)];
        let totals = compute_totals(&items, dec("10"), OrderKind::Quote);

        let new_transport = dec("25");
        let new_total = round_money(totals.subtotal + totals.tax + new_transport);

        assert_eq!(new_total, dec("144.00"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
        prop::collection::vec(
            ((1i64..=100_000i64), (1i32..=50)).prop_map(|(cents, quantity)| LineItem {
                product_name: "P".to_string(),
                price: Decimal::new(cents, 2),
                quantity,
            }),
            1..8,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Replacement totals depend only on the new item set, never on the
        /// replaced one.
        #[test]
        fn prop_replacement_ignores_old_items(
            old in items_strategy(),
            new in items_strategy()
        ) {
            let (_, subtotal_a) = replace_items(&old, new.clone(), Decimal::ZERO);
            let (_, subtotal_b) = replace_items(&[], new, Decimal::ZERO);
            prop_assert_eq!(subtotal_a, subtotal_b);
        }

        /// Replacing items twice with the same set is idempotent.
        #[test]
        fn prop_replacement_idempotent(items in items_strategy()) {
            let (first_items, first_subtotal) =
                replace_items(&[], items.clone(), Decimal::ZERO);
            let (second_items, second_subtotal) =
                replace_items(&first_items, items, Decimal::ZERO);

            prop_assert_eq!(first_items, second_items);
            prop_assert_eq!(first_subtotal, second_subtotal);
        }
    }
}
