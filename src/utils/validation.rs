//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use serde::Serialize;
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Wrapper sobre `validate_positive` con la firma que espera
/// `#[validate(custom)]`
pub fn validate_positive_decimal(value: &rust_decimal::Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)
}

/// Validar formato de matrícula de vehículo
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    // Formato básico: XX-123-XX o similar
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 4 || clean_plate.len() > 12 {
        let mut error = ValidationError::new("plate_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de método de pago (Cash, GCash, Card, etc.)
pub fn validate_payment_method(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.len() > 50 {
        let mut error = ValidationError::new("payment_method");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("hello").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
        assert!(validate_positive(Decimal::new(4999, 2)).is_ok());
        assert!(validate_positive(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_validate_plate_number() {
        assert!(validate_plate_number("AB-123-CD").is_ok());
        assert!(validate_plate_number("ABC1234").is_ok());
        assert!(validate_plate_number("A").is_err());
        assert!(validate_plate_number("ABCDEFGHIJKLM").is_err());
    }

    #[test]
    fn test_validate_payment_method() {
        assert!(validate_payment_method("Cash").is_ok());
        assert!(validate_payment_method("GCash").is_ok());
        assert!(validate_payment_method("").is_err());
        assert!(validate_payment_method(&"A".repeat(51)).is_err());
    }
}
