//! Helpers de formato para las vistas
//!
//! Moneda en rupias con agrupación india, fechas legibles y pequeñas
//! transformaciones de texto que usan las proyecciones.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Texto para valores ausentes
pub const NOT_AVAILABLE: &str = "N/A";

/// Días antes del vencimiento a partir de los cuales se avisa
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// Formatear un importe como `₹1,23,456.78`
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!(
        "{}₹{}.{}",
        if negative { "-" } else { "" },
        group_indian(integer),
        fraction
    )
}

/// Agrupación india: los últimos tres dígitos y después de dos en dos
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// `15 Jan 2024`
pub fn format_date(date: Option<&NaiveDate>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// `15 Jan 2024, 09:30:00`
pub fn format_date_time(value: Option<&DateTime<Utc>>) -> String {
    value
        .map(|dt| dt.format("%d %b %Y, %H:%M:%S").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Recortar texto largo añadiendo `...`
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_length).collect();
    format!("{}...", cut)
}

/// Primera letra en mayúscula, resto intacto
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn replace_underscores(value: &str) -> String {
    value.replace('_', " ")
}

/// Iniciales a partir de nombre y apellido
pub fn initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .next()
        .into_iter()
        .chain(last_name.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

pub fn is_expired(expiry: Option<&NaiveDate>, today: NaiveDate) -> bool {
    expiry.map_or(false, |date| *date < today)
}

/// Vence dentro de los próximos `EXPIRY_WARNING_DAYS` días (sin estar vencido)
pub fn is_expiring_soon(expiry: Option<&NaiveDate>, today: NaiveDate) -> bool {
    expiry.map_or(false, |date| {
        let days = (*date - today).num_days();
        days > 0 && days <= EXPIRY_WARNING_DAYS
    })
}

/// Porcentaje entero redondeado; 0 si el total es 0
pub fn calculate_percentage(value: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((value as f64 / total as f64) * 100.0).round().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(format_currency(Decimal::from(123456)), "₹1,23,456.00");
        assert_eq!(format_currency(Decimal::from_str("999.5").unwrap()), "₹999.50");
        assert_eq!(format_currency(Decimal::from(10000000)), "₹1,00,00,000.00");
        assert_eq!(format_currency(Decimal::from_str("-4500.005").unwrap()), "-₹4,500.01");
        assert_eq!(format_currency(Decimal::ZERO), "₹0.00");
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(truncate_text("Mumbai to Pune", 6), "Mumbai...");
        assert_eq!(truncate_text("Pune", 6), "Pune");
        assert_eq!(capitalize_first("custom"), "Custom");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(replace_underscores("out_of_service"), "out of service");
        assert_eq!(initials("ravi", "kumar"), "RK");
        assert_eq!(initials("", "kumar"), "K");
    }

    #[test]
    fn test_missing_dates() {
        assert_eq!(format_date(None), "N/A");
        assert_eq!(format_date_time(None), "N/A");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(Some(&date)), "15 Jan 2024");
    }

    #[test]
    fn test_expiry_windows() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let soon = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        assert!(is_expiring_soon(Some(&soon), today));
        assert!(!is_expiring_soon(Some(&later), today));
        assert!(!is_expiring_soon(Some(&past), today));
        assert!(is_expired(Some(&past), today));
        assert!(!is_expired(None, today));
    }

    #[test]
    fn test_percentage() {
        assert_eq!(calculate_percentage(1, 3), 33);
        assert_eq!(calculate_percentage(5, 0), 0);
    }
}
