//! Modelo de Order
//!
//! Orden de transporte: estado del ciclo de vida, importes y referencias
//! a propietario, conductor y camión. El saldo nunca se lee de la API,
//! siempre se deriva de total y anticipo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::validation::{
    validate_advance, validate_not_in_past, validate_order_total, validate_phone, validate_weight,
};

/// Estado de la orden
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Cancelled,
    Unknown(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Assigned => "assigned",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown(raw) => raw,
        }
    }

    /// Estados sin acciones de salida en la UI
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "pending" => OrderStatus::Pending,
            "assigned" => OrderStatus::Assigned,
            "in_transit" => OrderStatus::InTransit,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        OrderStatus::from(value.as_str())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Order tal como la devuelve `/api/transport/orders/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub description: String,
    pub status: OrderStatus,

    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub pickup_contact: Option<String>,
    #[serde(default)]
    pub pickup_phone: Option<String>,
    #[serde(default)]
    pub delivery_location: String,
    #[serde(default)]
    pub delivery_contact: Option<String>,
    #[serde(default)]
    pub delivery_phone: Option<String>,

    #[serde(default)]
    pub pickup_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_delivery_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub load_type: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<Decimal>,

    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub advance_amount: Decimal,

    pub owner: i64,
    #[serde(default)]
    pub driver: Option<i64>,
    #[serde(default)]
    pub truck: Option<i64>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Saldo pendiente: total menos anticipo
    pub fn balance(&self) -> Decimal {
        self.total_amount - self.advance_amount
    }

    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Formulario de creación/edición de orden
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_order_amounts_and_dates", skip_on_field_errors = false))]
pub struct OrderForm {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Pickup location is required"))]
    pub pickup_location: String,
    #[validate(length(min = 1, message = "Pickup contact is required"))]
    pub pickup_contact: String,
    #[validate(custom = "validate_phone")]
    pub pickup_phone: String,

    #[validate(length(min = 1, message = "Delivery location is required"))]
    pub delivery_location: String,
    #[validate(length(min = 1, message = "Delivery contact is required"))]
    pub delivery_contact: String,
    #[validate(custom = "validate_phone")]
    pub delivery_phone: String,

    #[validate(custom = "validate_not_in_past")]
    pub pickup_date: DateTime<Utc>,
    pub estimated_delivery_date: DateTime<Utc>,

    #[validate(length(min = 1, message = "Load type is required"))]
    pub load_type: String,
    #[validate(custom = "validate_weight")]
    pub weight: Decimal,
    pub volume: Option<Decimal>,

    #[validate(custom = "validate_order_total")]
    pub total_amount: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_advance")]
    pub advance_amount: Decimal,

    pub owner: i64,
    pub driver: Option<i64>,
    pub truck: Option<i64>,
}

fn validate_order_amounts_and_dates(form: &OrderForm) -> Result<(), ValidationError> {
    if form.advance_amount > form.total_amount {
        let mut error = ValidationError::new("advance_amount");
        error.message = Some("Advance amount cannot exceed total amount".into());
        return Err(error);
    }
    if form.estimated_delivery_date < form.pickup_date {
        let mut error = ValidationError::new("estimated_delivery_date");
        error.message = Some("Delivery date must be after pickup date".into());
        return Err(error);
    }
    Ok(())
}

/// Body de `/orders/{id}/update_status/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample_form() -> OrderForm {
        let pickup = Utc::now() + chrono::Duration::days(2);
        OrderForm {
            description: "Steel coils".to_string(),
            pickup_location: "Mumbai".to_string(),
            pickup_contact: "Anil".to_string(),
            pickup_phone: "9876543210".to_string(),
            delivery_location: "Pune".to_string(),
            delivery_contact: "Sunita".to_string(),
            delivery_phone: "8765432109".to_string(),
            pickup_date: pickup,
            estimated_delivery_date: pickup + chrono::Duration::days(1),
            load_type: "Heavy Machinery".to_string(),
            weight: Decimal::from(12),
            volume: None,
            total_amount: Decimal::from(10000),
            advance_amount: Decimal::from(2000),
            owner: 3,
            driver: None,
            truck: None,
        }
    }

    #[test]
    fn test_order_from_api_json() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 1,
            "order_number": "TRANS123456",
            "status": "in_transit",
            "pickup_location": "Mumbai",
            "delivery_location": "Pune",
            "total_amount": "10000.00",
            "advance_amount": "2500.50",
            "balance_amount": "0.00",
            "owner": 3,
            "driver": null,
            "truck": 9
        }))
        .unwrap();

        assert_eq!(order.status, OrderStatus::InTransit);
        assert_eq!(order.balance(), Decimal::from_str("7499.50").unwrap());
        assert!(order.is_active());
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let status: OrderStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status.as_str(), "on_hold");
        assert!(!status.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_form_rules() {
        assert!(sample_form().validate().is_ok());

        let too_much_advance = OrderForm {
            advance_amount: Decimal::from(20000),
            ..sample_form()
        };
        assert!(too_much_advance.validate().is_err());

        let base = sample_form();
        let backwards = OrderForm {
            estimated_delivery_date: base.pickup_date - chrono::Duration::hours(1),
            ..base
        };
        assert!(backwards.validate().is_err());

        let cheap = OrderForm {
            total_amount: Decimal::from(50),
            advance_amount: Decimal::ZERO,
            ..sample_form()
        };
        assert!(cheap.validate().is_err());
    }
}
