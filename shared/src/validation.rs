//! Validation utilities for the Melkar platform
//!
//! Boundary checks applied before any mutation reaches the database. All of
//! them are pure and return a static description of the failing rule; the
//! backend wraps them into its error type with field context.

use rust_decimal::Decimal;

use crate::models::LineItem;

// ============================================================================
// Order Validations
// ============================================================================

/// Validate a set of order line items: at least one line, and a positive
/// quantity on every line. Product existence is checked against the store by
/// the caller, since it depends on the order kind.
pub fn validate_line_items(items: &[LineItem]) -> Result<(), &'static str> {
    if items.is_empty() {
        return Err("Debe agregar al menos un producto");
    }
    for item in items {
        if item.quantity <= 0 {
            return Err("La cantidad debe ser mayor a 0");
        }
        if item.price < Decimal::ZERO {
            return Err("El precio no puede ser negativo");
        }
    }
    Ok(())
}

/// Validate a movement quantity (strictly positive integer).
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("La cantidad debe ser mayor a 0");
    }
    Ok(())
}

/// Validate a unit price (non-negative).
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("El precio no puede ser negativo");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate a required display name (non-blank).
pub fn validate_required_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Nombre requerido");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Email inválido")
    }
}

/// Validate a Colombian phone number: exactly 10 digits.
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err("El teléfono debe tener 10 dígitos");
    }
    Ok(())
}

/// Validate a NIT (tax id): digits with an optional `-D` check digit suffix,
/// e.g. `900123456-7`.
pub fn validate_nit(nit: &str) -> Result<(), &'static str> {
    let (body, check) = match nit.split_once('-') {
        Some((b, c)) => (b, Some(c)),
        None => (nit, None),
    };
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
        return Err("NIT inválido");
    }
    if let Some(check) = check {
        if check.len() != 1 || !check.chars().all(|c| c.is_ascii_digit()) {
            return Err("NIT inválido");
        }
    }
    Ok(())
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
    fn test_validate_line_items_ok() {
        let items = vec![item("Cemento", "25000", 4), item("Arena", "90.50", 1)];
        assert!(validate_line_items(&items).is_ok());
    }

    #[test]
    fn test_validate_line_items_empty() {
        assert!(validate_line_items(&[]).is_err());
    }

    #[test]
    fn test_validate_line_items_zero_quantity() {
        let items = vec![item("Cemento", "25000", 0)];
        assert!(validate_line_items(&items).is_err());
    }

    #[test]
    fn test_validate_line_items_negative_price() {
        let items = vec![item("Cemento", "-1", 2)];
        assert!(validate_line_items(&items).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("19.99")).is_ok());
        assert!(validate_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_required_name() {
        assert!(validate_required_name("Cemento Gris").is_ok());
        assert!(validate_required_name("").is_err());
        assert!(validate_required_name("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("cliente@melkar.co").is_ok());
        assert!(validate_email("invalido").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("300123456").is_err());
        assert!(validate_phone("30012345678").is_err());
        assert!(validate_phone("300-123-45").is_err());
    }

    #[test]
    fn test_validate_nit() {
        assert!(validate_nit("900123456").is_ok());
        assert!(validate_nit("900123456-7").is_ok());
        assert!(validate_nit("900123456-77").is_err());
        assert!(validate_nit("NIT-900").is_err());
        assert!(validate_nit("").is_err());
    }
}
