//! Utilidades de validación
//!
//! Reglas custom para los formularios del portal (teléfonos indios, matrículas,
//! importes y fechas de vencimiento). Se enchufan en `#[validate(custom = "...")]`.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Teléfono móvil indio: 10 dígitos empezando por 6-9
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();
    /// Matrícula de camión, p.ej. MH01AB1234
    pub static ref TRUCK_NUMBER_REGEX: Regex = Regex::new(r"^[A-Z]{2}\d{2}[A-Z]{2}\d{4}$").unwrap();
    pub static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Validar teléfono indio (se ignoran los caracteres no numéricos)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if !PHONE_REGEX.is_match(&digits) {
        let mut error = error_with_message("phone", "Please enter a valid Indian phone number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de camión
pub fn validate_truck_number(value: &str) -> Result<(), ValidationError> {
    if !TRUCK_NUMBER_REGEX.is_match(value) {
        let mut error = error_with_message(
            "truck_number",
            "Please enter a valid truck number (e.g., MH01AB1234)",
        );
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with_message("not_empty", "This field is required"));
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

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe decimal esté en un rango cerrado
pub fn validate_decimal_range(
    value: Decimal,
    min: Decimal,
    max: Option<Decimal>,
    message: &'static str,
) -> Result<(), ValidationError> {
    let above_max = max.map_or(false, |max| value > max);
    if value < min || above_max {
        let mut error = error_with_message("range", message);
        error.add_param("min".into(), &min.to_string());
        if let Some(max) = max {
            error.add_param("max".into(), &max.to_string());
        }
        error.add_param("actual".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Importes de gastos y transferencias: mínimo ₹1
pub fn validate_min_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(*value)?;
    validate_decimal_range(*value, Decimal::ONE, None, "Amount must be at least ₹1")
}

/// Importe total de una orden: mínimo ₹100
pub fn validate_order_total(value: &Decimal) -> Result<(), ValidationError> {
    validate_decimal_range(
        *value,
        Decimal::ONE_HUNDRED,
        None,
        "Total amount must be at least ₹100",
    )
}

/// Anticipo: no negativo (el tope contra el total se valida a nivel de struct)
pub fn validate_advance(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(*value)
        .map_err(|_| error_with_message("non_negative", "Advance amount cannot be negative"))
}

/// Peso de la carga en toneladas: 0.1..=100
pub fn validate_weight(value: &Decimal) -> Result<(), ValidationError> {
    validate_decimal_range(
        *value,
        Decimal::new(1, 1),
        Some(Decimal::ONE_HUNDRED),
        "Weight must be between 0.1 and 100 tons",
    )
}

/// Capacidad del camión en toneladas: 1..=100
pub fn validate_capacity(value: &Decimal) -> Result<(), ValidationError> {
    validate_decimal_range(
        *value,
        Decimal::ONE,
        Some(Decimal::ONE_HUNDRED),
        "Capacity must be between 1 and 100 tons",
    )
}

/// Año de fabricación entre 2000 y el año en curso
pub fn validate_truck_year(value: i32) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if value < 2000 || value > current_year {
        let mut error = error_with_message("year", "Year must be between 2000 and the current year");
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Documentos (RC, seguro, licencia...) no pueden estar vencidos
pub fn validate_not_expired(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value < Utc::now().date_naive() {
        let mut error = error_with_message("expired", "Document must not be expired");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// La fecha de recogida no puede estar en el pasado
pub fn validate_not_in_past(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *value < Utc::now() {
        return Err(error_with_message("past_date", "Pickup date cannot be in the past"));
    }
    Ok(())
}

/// Validar formato de email (mismo patrón que el login)
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(value) {
        let mut error = error_with_message("email", "Please enter a valid email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_phone_validation() {
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("98765-43210").is_ok());
        assert!(validate_phone("5876543210").is_err());
        assert!(validate_phone("98765").is_err());
    }

    #[test]
    fn test_truck_number_validation() {
        assert!(validate_truck_number("MH01AB1234").is_ok());
        assert!(validate_truck_number("mh01ab1234").is_err());
        assert!(validate_truck_number("MH1AB1234").is_err());
    }

    #[test]
    fn test_amount_rules() {
        assert!(validate_min_amount(&Decimal::from_str("1.00").unwrap()).is_ok());
        assert!(validate_min_amount(&Decimal::from_str("0.50").unwrap()).is_err());
        assert!(validate_order_total(&Decimal::from(99)).is_err());
        assert!(validate_order_total(&Decimal::from(100)).is_ok());
        assert!(validate_advance(&Decimal::from(-1)).is_err());
        assert!(validate_weight(&Decimal::from_str("0.1").unwrap()).is_ok());
        assert!(validate_weight(&Decimal::from_str("100.01").unwrap()).is_err());
        assert!(validate_capacity(&Decimal::ZERO).is_err());
    }

    #[test]
    fn test_dates() {
        let yesterday = Utc::now().date_naive() - chrono::Duration::days(1);
        let next_year = Utc::now().date_naive() + chrono::Duration::days(365);
        assert!(validate_not_expired(&yesterday).is_err());
        assert!(validate_not_expired(&next_year).is_ok());
        assert!(validate_truck_year(1999).is_err());
        assert!(validate_truck_year(Utc::now().year()).is_ok());
        assert!(validate_truck_year(Utc::now().year() + 1).is_err());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("admin@fleet.in").is_ok());
        assert!(validate_email("admin@fleet").is_err());
        assert!(validate_email("ad min@fleet.in").is_err());
    }
}
