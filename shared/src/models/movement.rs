//! Inventory movement directions

use serde::{Deserialize, Serialize};

/// Direction of an inventory movement.
///
/// Movements are an append-only ledger: every stock-changing event (sale,
/// purchase, restock, manual adjustment) produces exactly one movement row,
/// and rows are never updated or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementDirection {
    #[serde(rename = "ENTRADA")]
    Entrada,
    #[serde(rename = "SALIDA")]
    Salida,
}

impl MovementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDirection::Entrada => "ENTRADA",
            MovementDirection::Salida => "SALIDA",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ENTRADA" => Some(MovementDirection::Entrada),
            "SALIDA" => Some(MovementDirection::Salida),
            _ => None,
        }
    }

    /// Stock after applying this movement on the adjustment path.
    ///
    /// ENTRADA adds; SALIDA subtracts with a floor at zero. Callers that
    /// must not lose units (sale debits) pre-validate sufficiency so the
    /// floor never engages for them.
    pub fn apply(&self, stock: i32, quantity: i32) -> i32 {
        match self {
            MovementDirection::Entrada => stock + quantity,
            MovementDirection::Salida => (stock - quantity).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_labels() {
        assert_eq!(MovementDirection::Entrada.as_str(), "ENTRADA");
        assert_eq!(MovementDirection::Salida.as_str(), "SALIDA");
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(
            MovementDirection::parse("ENTRADA"),
            Some(MovementDirection::Entrada)
        );
        assert_eq!(
            MovementDirection::parse("SALIDA"),
            Some(MovementDirection::Salida)
        );
        assert_eq!(MovementDirection::parse("entrada"), None);
    }

    #[test]
    fn test_apply_entrada() {
        assert_eq!(MovementDirection::Entrada.apply(10, 5), 15);
        assert_eq!(MovementDirection::Entrada.apply(0, 20), 20);
    }

    #[test]
    fn test_apply_salida_clamps_at_zero() {
        assert_eq!(MovementDirection::Salida.apply(10, 4), 6);
        assert_eq!(MovementDirection::Salida.apply(3, 5), 0);
        assert_eq!(MovementDirection::Salida.apply(0, 1), 0);
    }
}
