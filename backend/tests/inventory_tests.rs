//! Stock ledger tests
//!
//! Covers the stock label function, the movement policy (ENTRADA credits,
//! SALIDA rejected when insufficient, floor at zero), and the invariant
//! that stock never goes negative under any accepted movement sequence.

use proptest::prelude::*;

use shared::{validate_quantity, AlertLevel, MovementDirection, StockStatus};

// ============================================================================
// Ledger simulation
// ============================================================================

/// Mirror of the adjustment-path policy: quantity must be positive, a
/// SALIDA larger than the current stock is rejected, and the write floors
/// at zero behind that check.
fn simulate_movement(
    stock: i32,
    direction: MovementDirection,
    quantity: i32,
) -> Result<i32, &'static str> {
    validate_quantity(quantity)?;

    if direction == MovementDirection::Salida && stock < quantity {
        return Err("Stock insuficiente para esta salida");
    }

    Ok(direction.apply(stock, quantity))
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_entrada_credits_stock() {
        assert_eq!(
            simulate_movement(10, MovementDirection::Entrada, 5),
            Ok(15)
        );
    }

    #[test]
    fn test_salida_debits_stock() {
        assert_eq!(simulate_movement(10, MovementDirection::Salida, 4), Ok(6));
    }

    /// A SALIDA exceeding the stock is rejected outright, not clamped:
    /// stock=3, requested 5 must fail and leave the stock at 3.
    #[test]
    fn test_salida_insufficient_is_rejected() {
        let stock = 3;
        let result = simulate_movement(stock, MovementDirection::Salida, 5);
        assert!(result.is_err());
        assert_eq!(stock, 3);
    }

    /// Exact depletion is allowed and lands on zero.
    #[test]
    fn test_salida_exact_depletion() {
        assert_eq!(simulate_movement(5, MovementDirection::Salida, 5), Ok(0));
    }

    #[test]
    fn test_non_positive_quantities_rejected() {
        assert!(simulate_movement(10, MovementDirection::Entrada, 0).is_err());
        assert!(simulate_movement(10, MovementDirection::Entrada, -3).is_err());
        assert!(simulate_movement(10, MovementDirection::Salida, 0).is_err());
    }

    /// The write-path floor exists but is unreachable behind the pre-check.
    #[test]
    fn test_apply_floors_at_zero() {
        assert_eq!(MovementDirection::Salida.apply(3, 5), 0);
    }

    /// Restock scenario: +20 on top of any stock, label recomputed.
    #[test]
    fn test_restock_default_quantity() {
        let stock = simulate_movement(2, MovementDirection::Entrada, 20).unwrap();
        assert_eq!(stock, 22);
        assert_eq!(StockStatus::from_stock(stock), StockStatus::EnStock);
    }

    #[test]
    fn test_status_label_bands() {
        assert_eq!(StockStatus::from_stock(25).as_str(), "En Stock");
        assert_eq!(StockStatus::from_stock(11).as_str(), "En Stock");
        assert_eq!(StockStatus::from_stock(10).as_str(), "Stock Bajo");
        assert_eq!(StockStatus::from_stock(1).as_str(), "Stock Bajo");
        assert_eq!(StockStatus::from_stock(0).as_str(), "Sin Stock");
    }

    #[test]
    fn test_alert_labels() {
        assert_eq!(AlertLevel::from_stock(3).as_str(), "Crítico");
        assert_eq!(AlertLevel::from_stock(7).as_str(), "Bajo");
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in [MovementDirection::Entrada, MovementDirection::Salida] {
            assert_eq!(MovementDirection::parse(direction.as_str()), Some(direction));
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn direction_strategy() -> impl Strategy<Value = MovementDirection> {
        prop_oneof![
            Just(MovementDirection::Entrada),
            Just(MovementDirection::Salida),
        ]
    }

    fn movement_strategy() -> impl Strategy<Value = (MovementDirection, i32)> {
        (direction_strategy(), 1i32..=100)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Stock never goes negative under any sequence of accepted
        /// movements; rejected movements leave it untouched.
        #[test]
        fn prop_stock_never_negative(
            initial in 0i32..=50,
            movements in prop::collection::vec(movement_strategy(), 1..30)
        ) {
            let mut stock = initial;
            for (direction, quantity) in movements {
                match simulate_movement(stock, direction, quantity) {
                    Ok(new_stock) => stock = new_stock,
                    Err(_) => { /* rejected, stock unchanged */ }
                }
                prop_assert!(stock >= 0);
            }
        }

        /// The status label is always the pure function of the stock count.
        #[test]
        fn prop_status_matches_stock(stock in -100i32..=1000) {
            let status = StockStatus::from_stock(stock);
            if stock > 10 {
                prop_assert_eq!(status, StockStatus::EnStock);
            } else if stock > 0 {
                prop_assert_eq!(status, StockStatus::StockBajo);
            } else {
                prop_assert_eq!(status, StockStatus::SinStock);
            }
        }

        /// An accepted SALIDA subtracts exactly; the floor never engages
        /// behind the sufficiency check.
        #[test]
        fn prop_accepted_salida_subtracts_exactly(
            stock in 0i32..=200,
            quantity in 1i32..=200
        ) {
            match simulate_movement(stock, MovementDirection::Salida, quantity) {
                Ok(new_stock) => prop_assert_eq!(new_stock, stock - quantity),
                Err(_) => prop_assert!(stock < quantity),
            }
        }

        /// ENTRADA always succeeds for positive quantities and adds exactly.
        #[test]
        fn prop_entrada_adds_exactly(
            stock in 0i32..=1000,
            quantity in 1i32..=1000
        ) {
            let new_stock = simulate_movement(stock, MovementDirection::Entrada, quantity);
            prop_assert_eq!(new_stock, Ok(stock + quantity));
        }
    }
}
